//! Gesture-driven circular carousel
//!
//! Raw input flows one way:
//!
//! ```text
//! pointer/wheel/tab -> GestureArbiter -> NavigationIntent
//!     -> CarouselState::apply -> StateDelta -> AnimationTriggerTracker
//! ```
//!
//! [`Carousel`] wires the pieces together and owns the timers they share.
//! The host feeds it events and calls [`Carousel::tick`] from its event loop;
//! the presentation layer reads [`Carousel::snapshot`].

mod gesture;
mod intent;
mod item;
mod pulse;
mod ring;
mod scroll;
mod state;
mod tabs;

#[cfg(test)]
mod tests;

use std::time::Instant;

use tracing::debug;

use crate::config::{AnimationConfig, GestureConfig};
use crate::timer::TimerQueue;

pub use gesture::{
    resolve_tap, resolve_tap_on, Gesture, GestureArbiter, GestureSession, PointerPhase,
    PointerPosition, WheelDisposition,
};
pub use intent::{Direction, NavigationIntent, RejectReason, StateDelta, StateFields};
pub use item::{default_items, CarouselItem};
pub use pulse::{AnimationTriggerTracker, SwipePulse};
pub use ring::{ring_offset, wrap};
pub use scroll::ScrollAccumulator;
pub use state::CarouselState;
pub use tabs::{is_coherent, synced_tab};

/// Timers owned by a carousel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTimer {
    ScrollDebounce,
    PulseClear,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot {
    pub front: usize,
    pub previous_front: usize,
    pub expanded: bool,
    pub active_tab: usize,
    /// `ring_offsets[i]` is item `i`'s position relative to `front`
    pub ring_offsets: Vec<usize>,
    pub pulse: SwipePulse,
    pub pulse_active: bool,
    /// Live horizontal drag offset while a drag is in progress
    pub drag_offset: Option<f64>,
}

#[derive(Debug)]
pub struct Carousel {
    items: Vec<CarouselItem>,
    state: CarouselState,
    arbiter: GestureArbiter,
    pulse: AnimationTriggerTracker,
    timers: TimerQueue<CarouselTimer>,
}

impl Carousel {
    pub fn new(
        items: Vec<CarouselItem>,
        gesture: &GestureConfig,
        animation: &AnimationConfig,
    ) -> crate::Result<Self> {
        gesture.validate()?;
        let state = CarouselState::new(items.len())?;
        Ok(Self {
            items,
            state,
            arbiter: GestureArbiter::new(gesture.clone()),
            pulse: AnimationTriggerTracker::new(animation.pulse_duration()),
            timers: TimerQueue::new(),
        })
    }

    /// Auto-rickshaw, bus and taxi with the given settings
    pub fn with_default_items(
        gesture: &GestureConfig,
        animation: &AnimationConfig,
    ) -> crate::Result<Self> {
        Self::new(default_items(), gesture, animation)
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    pub fn current_item(&self) -> &CarouselItem {
        &self.items[self.state.front()]
    }

    pub fn ring_offset(&self, index: usize) -> usize {
        ring_offset(index, self.state.front(), self.len())
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        let fields = self.state.fields();
        CarouselSnapshot {
            front: fields.front,
            previous_front: fields.previous_front,
            expanded: fields.expanded,
            active_tab: fields.active_tab,
            ring_offsets: (0..self.len()).map(|i| self.ring_offset(i)).collect(),
            pulse: self.pulse.pulse(),
            pulse_active: self.pulse.is_active(),
            drag_offset: self.arbiter.drag_offset(),
        }
    }

    /// Apply an intent directly, bypassing gesture arbitration
    pub fn apply(&mut self, intent: NavigationIntent, now: Instant) -> StateDelta {
        let delta = self.state.apply(intent);
        if let Some(direction) = delta.navigated() {
            self.pulse.on_navigate(direction, &mut self.timers, now);
        }
        let opened = matches!(
            delta,
            StateDelta::Applied {
                intent: NavigationIntent::Open(_),
                ..
            }
        );
        if opened || delta.navigated().is_some() {
            // A pending scroll window must not commit a second move
            self.arbiter.reset_scroll(&mut self.timers);
        }
        delta
    }

    pub fn select_tab(&mut self, tab: usize, now: Instant) -> StateDelta {
        self.apply(NavigationIntent::SelectTab(tab), now)
    }

    pub fn close(&mut self, now: Instant) -> StateDelta {
        self.apply(NavigationIntent::Close, now)
    }

    pub fn pointer_down(&mut self, position: PointerPosition, now: Instant) {
        self.arbiter.pointer_down(position, now);
    }

    pub fn pointer_move(&mut self, position: PointerPosition, now: Instant) -> Option<f64> {
        self.arbiter.pointer_move(position, now)
    }

    /// Release the pointer. At most one intent is committed.
    pub fn pointer_up(
        &mut self,
        position: PointerPosition,
        target: Option<usize>,
        now: Instant,
    ) -> Option<StateDelta> {
        let expanded = self.state.is_expanded();
        let gesture = self.arbiter.pointer_up(position, target, expanded, now);
        self.commit_gesture(gesture, now)
    }

    pub fn pointer_cancel(&mut self) {
        self.arbiter.pointer_cancel();
    }

    pub fn wheel(&mut self, delta: f64, now: Instant) -> WheelDisposition {
        let expanded = self.state.is_expanded();
        self.arbiter.wheel(delta, expanded, &mut self.timers, now)
    }

    /// Fire every timer due at `now`, returning the deltas they produced
    pub fn tick(&mut self, now: Instant) -> Vec<StateDelta> {
        let mut deltas = Vec::new();
        while let Some((handle, kind)) = self.timers.pop_expired(now) {
            debug!(?kind, "Carousel timer fired");
            match kind {
                CarouselTimer::ScrollDebounce => {
                    let expanded = self.state.is_expanded();
                    let gesture = self.arbiter.on_scroll_timer(handle, expanded);
                    if let Some(delta) = self.commit_gesture(gesture, now) {
                        deltas.push(delta);
                    }
                }
                CarouselTimer::PulseClear => {
                    self.pulse.on_timer(handle);
                }
            }
        }
        deltas
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Cancel every pending timer and drop transient input state. Nothing
    /// scheduled before teardown can fire afterwards.
    pub fn teardown(&mut self) {
        self.arbiter.teardown(&mut self.timers);
        self.pulse.teardown(&mut self.timers);
        self.timers.cancel_all();
        debug!("Carousel torn down");
    }

    fn commit_gesture(&mut self, gesture: Gesture, now: Instant) -> Option<StateDelta> {
        let intent = match gesture {
            Gesture::None => None,
            Gesture::Tap { index } => resolve_tap_on(
                index,
                self.len(),
                self.state.front(),
                self.state.is_expanded(),
            ),
            Gesture::DragNavigate(direction) | Gesture::ScrollNavigate(direction) => {
                Some(NavigationIntent::Navigate(direction))
            }
        }?;
        Some(self.apply(intent, now))
    }
}
