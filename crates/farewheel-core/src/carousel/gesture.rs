//! Classifies raw pointer and wheel input into at most one gesture per action
//!
//! ```text
//! pointer:  Idle -> Pressed -> Dragging -> Idle
//!                      \-------------------> Idle (tap candidate)
//! wheel:    delta -> accumulate + restart debounce -> fire -> decide, reset
//! ```
//!
//! "Was dragging" and "released fast enough to flick" are tracked
//! separately: a slow drag commits nothing, yet still suppresses the tap.

use std::time::Instant;

use tracing::debug;

use crate::config::GestureConfig;
use crate::timer::{TimerHandle, TimerQueue};

use super::intent::{Direction, NavigationIntent};
use super::ring::ring_offset;
use super::scroll::ScrollAccumulator;
use super::CarouselTimer;

/// Pointer location in presentation units (pixels, terminal cells, ...)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, other: &PointerPosition) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Idle,
    Pressed,
    Dragging,
}

/// Ephemeral state of one pointer interaction, from down to up or cancel
#[derive(Debug, Clone)]
pub struct GestureSession {
    start: PointerPosition,
    last: PointerPosition,
    last_sample_at: Instant,
    /// Horizontal velocity of the most recent movement, units per second
    last_velocity: f64,
    dragging: bool,
}

impl GestureSession {
    fn new(position: PointerPosition, now: Instant) -> Self {
        Self {
            start: position,
            last: position,
            last_sample_at: now,
            last_velocity: 0.0,
            dragging: false,
        }
    }

    fn sample(&mut self, position: PointerPosition, now: Instant, slop: f64) {
        if position == self.last {
            return;
        }
        let dt = now.saturating_duration_since(self.last_sample_at).as_secs_f64();
        if dt > 0.0 {
            self.last_velocity = (position.x - self.last.x) / dt;
        }
        self.last = position;
        self.last_sample_at = now;
        if !self.dragging && position.distance_to(&self.start) > slop {
            self.dragging = true;
        }
    }

    /// Live horizontal offset from the press point
    pub fn offset_x(&self) -> f64 {
        self.last.x - self.start.x
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }
}

/// Classified outcome of one user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    None,
    /// Release without drag on the card at `index`
    Tap { index: usize },
    DragNavigate(Direction),
    ScrollNavigate(Direction),
}

/// What happened to a wheel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDisposition {
    /// Added to the accumulator; the debounce window was restarted
    Accumulated,
    /// Detail view is open; the host may scroll its page instead
    IgnoredExpanded,
    /// A pointer drag owns the input
    IgnoredDragging,
}

#[derive(Debug, Clone)]
pub struct GestureArbiter {
    config: GestureConfig,
    session: Option<GestureSession>,
    scroll: ScrollAccumulator,
}

impl GestureArbiter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            scroll: ScrollAccumulator::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn phase(&self) -> PointerPhase {
        match &self.session {
            None => PointerPhase::Idle,
            Some(session) if session.dragging => PointerPhase::Dragging,
            Some(_) => PointerPhase::Pressed,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Drag offset for presentational feedback; never used to commit
    pub fn drag_offset(&self) -> Option<f64> {
        self.session
            .as_ref()
            .filter(|session| session.dragging)
            .map(GestureSession::offset_x)
    }

    pub fn scroll_sum(&self) -> f64 {
        self.scroll.sum()
    }

    pub fn pointer_down(&mut self, position: PointerPosition, now: Instant) {
        if self.session.is_some() {
            debug!("Pointer down without release; discarding previous session");
        }
        self.session = Some(GestureSession::new(position, now));
    }

    /// Track movement. Returns the live drag offset once the press has become a drag.
    pub fn pointer_move(&mut self, position: PointerPosition, now: Instant) -> Option<f64> {
        let slop = self.config.drag_slop;
        let session = self.session.as_mut()?;
        session.sample(position, now, slop);
        session.dragging.then(|| session.offset_x())
    }

    /// Finish the interaction and classify it. `target` is the card under the
    /// release point, if any. The session is discarded whatever the outcome.
    pub fn pointer_up(
        &mut self,
        position: PointerPosition,
        target: Option<usize>,
        expanded: bool,
        now: Instant,
    ) -> Gesture {
        let Some(mut session) = self.session.take() else {
            return Gesture::None;
        };
        session.sample(position, now, self.config.drag_slop);

        let since_sample = now.saturating_duration_since(session.last_sample_at);
        let velocity = if since_sample > self.config.velocity_window() {
            0.0
        } else {
            session.last_velocity
        };

        let gesture = if !expanded && velocity.abs() > self.config.flick_velocity_threshold {
            // Swiping left (negative velocity) advances to the next card
            if velocity < 0.0 {
                Gesture::DragNavigate(Direction::Next)
            } else {
                Gesture::DragNavigate(Direction::Previous)
            }
        } else if !session.dragging {
            match target {
                Some(index) => Gesture::Tap { index },
                None => Gesture::None,
            }
        } else {
            Gesture::None
        };

        debug!(
            velocity,
            dragging = session.dragging,
            ?gesture,
            "Pointer released"
        );
        gesture
    }

    /// Pointer left the tracking surface. Equivalent to a sub-threshold release.
    pub fn pointer_cancel(&mut self) {
        if self.session.take().is_some() {
            debug!("Pointer session cancelled");
        }
    }

    pub fn wheel(
        &mut self,
        delta: f64,
        expanded: bool,
        timers: &mut TimerQueue<CarouselTimer>,
        now: Instant,
    ) -> WheelDisposition {
        if expanded {
            return WheelDisposition::IgnoredExpanded;
        }
        if self.phase() == PointerPhase::Dragging {
            return WheelDisposition::IgnoredDragging;
        }
        self.scroll
            .push(delta, timers, now, self.config.scroll_debounce());
        WheelDisposition::Accumulated
    }

    /// Debounce window elapsed. Stale handles (superseded or cancelled) yield
    /// [`Gesture::None`] without touching the accumulator.
    pub fn on_scroll_timer(&mut self, handle: TimerHandle, expanded: bool) -> Gesture {
        let Some(sum) = self.scroll.settle(handle) else {
            return Gesture::None;
        };
        if expanded || sum.abs() <= self.config.scroll_threshold {
            debug!(sum, expanded, "Scroll window settled without navigation");
            return Gesture::None;
        }
        match Direction::from_sign(sum) {
            Some(direction) => Gesture::ScrollNavigate(direction),
            None => Gesture::None,
        }
    }

    /// Drop any partial scroll accumulation and its pending timer
    pub fn reset_scroll(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        self.scroll.reset(timers);
    }

    /// Forget all transient input state
    pub fn teardown(&mut self, timers: &mut TimerQueue<CarouselTimer>) {
        self.session = None;
        self.scroll.reset(timers);
    }
}

/// Map a tap on the card at `ring_offset` from the front to an intent.
/// Only the center card and its two immediate neighbors are actionable.
pub fn resolve_tap(offset: usize, len: usize, front: usize, expanded: bool) -> Option<NavigationIntent> {
    if offset == 0 {
        return (!expanded).then_some(NavigationIntent::Open(front));
    }
    if offset == 1 {
        Some(NavigationIntent::Navigate(Direction::Next))
    } else if offset == len - 1 {
        Some(NavigationIntent::Navigate(Direction::Previous))
    } else {
        None
    }
}

/// Resolve a tap on `index` given the current front
pub fn resolve_tap_on(index: usize, len: usize, front: usize, expanded: bool) -> Option<NavigationIntent> {
    if index >= len {
        return None;
    }
    resolve_tap(ring_offset(index, front, len), len, front, expanded)
}
