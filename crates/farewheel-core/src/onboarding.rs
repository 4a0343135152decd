//! First-run swipe hint
//!
//! `Pending -> (show delay) -> Visible -> (visible duration) -> Completed`.
//! The persisted flag is read once at start and written once, on the final
//! transition only. Tearing down early cancels the timers and leaves the flag
//! unset so the hint plays again next launch.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::OnboardingConfig;
use crate::flags::{FlagStore, TUTORIAL_SHOWN_KEY};
use crate::timer::{Debouncer, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPhase {
    /// Waiting for the show delay
    Pending,
    Visible,
    /// Played to completion and persisted
    Completed,
    /// Already shown on an earlier run, or disabled
    Skipped,
    /// Torn down before completing
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Show,
    Hide,
}

#[derive(Debug)]
pub struct OnboardingTimer {
    phase: OnboardingPhase,
    visible_for: Duration,
    timers: TimerQueue<Step>,
    slot: Debouncer,
}

impl OnboardingTimer {
    pub fn start(config: &OnboardingConfig, store: &dyn FlagStore, now: Instant) -> Self {
        let mut timer = Self {
            phase: OnboardingPhase::Skipped,
            visible_for: Duration::from_millis(config.visible_ms),
            timers: TimerQueue::new(),
            slot: Debouncer::new(),
        };

        if !config.enabled {
            debug!("Onboarding hint disabled");
            return timer;
        }

        let already_shown = match store.is_set(TUTORIAL_SHOWN_KEY) {
            Ok(shown) => shown,
            Err(e) => {
                warn!("Failed to read onboarding flag, showing hint: {}", e);
                false
            }
        };
        if already_shown {
            debug!("Onboarding hint already shown");
            return timer;
        }

        timer.phase = OnboardingPhase::Pending;
        timer.slot.restart(
            &mut timer.timers,
            now,
            Duration::from_millis(config.show_delay_ms),
            Step::Show,
        );
        timer
    }

    pub fn phase(&self) -> OnboardingPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == OnboardingPhase::Visible
    }

    /// Still waiting on a timer
    pub fn is_running(&self) -> bool {
        matches!(self.phase, OnboardingPhase::Pending | OnboardingPhase::Visible)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Advance to `now`. Returns the new phase if it changed.
    pub fn tick(&mut self, now: Instant, store: &mut dyn FlagStore) -> Option<OnboardingPhase> {
        let before = self.phase;
        while let Some((handle, step)) = self.timers.pop_expired(now) {
            if !self.slot.take_if_current(handle) {
                continue;
            }
            match (self.phase, step) {
                (OnboardingPhase::Pending, Step::Show) => {
                    self.phase = OnboardingPhase::Visible;
                    self.slot
                        .restart(&mut self.timers, now, self.visible_for, Step::Hide);
                    debug!("Onboarding hint visible");
                }
                (OnboardingPhase::Visible, Step::Hide) => {
                    self.phase = OnboardingPhase::Completed;
                    if let Err(e) = store.set(TUTORIAL_SHOWN_KEY) {
                        warn!("Failed to persist onboarding flag: {}", e);
                    }
                    info!("Onboarding hint completed");
                }
                (phase, step) => {
                    debug!(?phase, ?step, "Ignoring onboarding timer in unexpected phase");
                }
            }
        }
        (self.phase != before).then_some(self.phase)
    }

    /// Cancel pending timers. The flag stays unset unless already completed.
    pub fn teardown(&mut self) {
        self.slot.cancel(&mut self.timers);
        self.timers.cancel_all();
        if self.is_running() {
            self.phase = OnboardingPhase::Cancelled;
            debug!("Onboarding hint cancelled");
        }
    }
}
