//! Card slide and wiggle driven by the carousel's swipe pulse
//!
//! The animator never inspects the pulse direction to decide whether to
//! restart: only a new nonce does, so repeated swipes the same way each
//! replay the slide.

use std::time::{Duration, Instant};

use farewheel_core::{AnimationConfig, Direction, EasingType, SwipePulse};

use super::curve::{damped_wave, remaining};
use super::timing::{is_complete_at, progress_at};

/// Wiggle amplitude in cells
const WIGGLE_CELLS: f64 = 1.0;
/// Full wiggle oscillations per pulse window
const WIGGLE_CYCLES: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
struct ActiveSlide {
    start: Instant,
    direction: Direction,
}

#[derive(Debug, Clone)]
pub struct SlideAnimator {
    slide: Option<ActiveSlide>,
    wiggle_start: Option<Instant>,
    last_nonce: u64,
    duration: Duration,
    wiggle_duration: Duration,
    easing: EasingType,
    smooth: bool,
}

impl SlideAnimator {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            slide: None,
            wiggle_start: None,
            last_nonce: 0,
            duration: config.slide_duration(),
            wiggle_duration: config.pulse_duration(),
            easing: config.easing,
            smooth: config.is_smooth(),
        }
    }

    /// Feed the latest pulse. Returns true if a new slide started.
    pub fn observe(&mut self, pulse: SwipePulse, now: Instant) -> bool {
        if pulse.nonce == self.last_nonce {
            return false;
        }
        self.last_nonce = pulse.nonce;
        let Some(direction) = pulse.direction else {
            return false;
        };
        self.wiggle_start = Some(now);
        if self.smooth {
            self.slide = Some(ActiveSlide {
                start: now,
                direction,
            });
        }
        true
    }

    /// Drop finished animations
    pub fn update(&mut self, now: Instant) {
        if let Some(slide) = self.slide {
            if is_complete_at(slide.start, self.duration, now) {
                self.slide = None;
            }
        }
        if let Some(start) = self.wiggle_start {
            if is_complete_at(start, self.wiggle_duration, now) {
                self.wiggle_start = None;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.slide.is_some() || self.wiggle_start.is_some()
    }

    /// Horizontal shift as a fraction of one card width. Navigating to the
    /// next card starts the cards one slot to the right and eases them home.
    pub fn shift(&self, now: Instant) -> f64 {
        match self.slide {
            Some(slide) => {
                let t = progress_at(slide.start, self.duration, now);
                slide.direction.step() as f64 * remaining(self.easing, t)
            }
            None => 0.0,
        }
    }

    /// Cell offset of the wiggling swipe hint, while the pulse window is open
    pub fn wiggle(&self, now: Instant) -> Option<i16> {
        let start = self.wiggle_start?;
        let t = progress_at(start, self.wiggle_duration, now);
        if t >= 1.0 {
            return None;
        }
        Some((damped_wave(t, WIGGLE_CYCLES) * WIGGLE_CELLS).round() as i16)
    }

    pub fn cancel(&mut self) {
        self.slide = None;
        self.wiggle_start = None;
    }
}
