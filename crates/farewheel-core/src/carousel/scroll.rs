//! Wheel delta accumulation with a restartable debounce window

use std::time::{Duration, Instant};

use tracing::debug;

use crate::timer::{Debouncer, TimerHandle, TimerQueue};

use super::CarouselTimer;

/// Running wheel total for the current debounce window
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollAccumulator {
    sum: f64,
    pending: Debouncer,
}

impl ScrollAccumulator {
    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Add a delta and restart the window. Non-finite deltas are dropped.
    pub fn push(
        &mut self,
        delta: f64,
        timers: &mut TimerQueue<CarouselTimer>,
        now: Instant,
        window: Duration,
    ) {
        if !delta.is_finite() {
            debug!(delta, "Ignoring non-finite wheel delta");
            return;
        }
        self.sum += delta;
        self.pending
            .restart(timers, now, window, CarouselTimer::ScrollDebounce);
    }

    /// Close the window if `handle` is the live one, returning the total and
    /// resetting it to zero.
    pub fn settle(&mut self, handle: TimerHandle) -> Option<f64> {
        if !self.pending.take_if_current(handle) {
            return None;
        }
        Some(std::mem::take(&mut self.sum))
    }

    pub fn reset(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        self.pending.cancel(timers);
        self.sum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_restarts_on_each_delta() {
        let t0 = Instant::now();
        let window = Duration::from_millis(100);
        let mut timers = TimerQueue::new();
        let mut acc = ScrollAccumulator::default();

        acc.push(20.0, &mut timers, t0, window);
        acc.push(20.0, &mut timers, t0 + Duration::from_millis(90), window);

        assert_eq!(timers.len(), 1);
        assert!(timers.pop_expired(t0 + Duration::from_millis(150)).is_none());
        let (handle, _) = timers.pop_expired(t0 + Duration::from_millis(190)).unwrap();
        assert_eq!(acc.settle(handle), Some(40.0));
        assert_eq!(acc.sum(), 0.0);
        assert!(!acc.is_pending());
    }

    #[test]
    fn test_non_finite_delta_dropped() {
        let mut timers = TimerQueue::new();
        let mut acc = ScrollAccumulator::default();
        acc.push(f64::INFINITY, &mut timers, Instant::now(), Duration::from_millis(100));
        assert_eq!(acc.sum(), 0.0);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_reset_cancels_pending() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let mut acc = ScrollAccumulator::default();
        acc.push(70.0, &mut timers, t0, Duration::from_millis(100));
        acc.reset(&mut timers);
        assert!(timers.is_empty());
        assert_eq!(acc.sum(), 0.0);
    }
}
