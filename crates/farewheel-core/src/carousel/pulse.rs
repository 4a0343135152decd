//! One-shot "swipe pulse" requests for the decorative wiggle

use std::time::{Duration, Instant};

use crate::timer::{Debouncer, TimerHandle, TimerQueue};

use super::intent::Direction;
use super::CarouselTimer;

/// Latest pulse request. Consumers watch `nonce`, not `direction`, so a
/// repeated direction still restarts the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwipePulse {
    pub direction: Option<Direction>,
    pub nonce: u64,
}

#[derive(Debug, Clone)]
pub struct AnimationTriggerTracker {
    pulse: SwipePulse,
    active: bool,
    window: Duration,
    clear: Debouncer,
}

impl AnimationTriggerTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            pulse: SwipePulse::default(),
            active: false,
            window,
            clear: Debouncer::new(),
        }
    }

    pub fn pulse(&self) -> SwipePulse {
        self.pulse
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Issue a fresh pulse for a committed navigation
    pub fn on_navigate(
        &mut self,
        direction: Direction,
        timers: &mut TimerQueue<CarouselTimer>,
        now: Instant,
    ) {
        self.pulse = SwipePulse {
            direction: Some(direction),
            nonce: self.pulse.nonce.wrapping_add(1),
        };
        self.active = true;
        self.clear
            .restart(timers, now, self.window, CarouselTimer::PulseClear);
    }

    /// Auto-clear timer fired. Returns true if it belonged to the live pulse.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.clear.take_if_current(handle) {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn teardown(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        self.clear.cancel(timers);
        self.active = false;
    }
}
