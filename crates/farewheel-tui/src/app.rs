use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveTime, Timelike};
use farewheel_core::fare::in_night_window;
use farewheel_core::route::TapOutcome;
use farewheel_core::{
    AppConfig, Carousel, DistancePicker, FareBreakdown, FareProvider, FlagStore, Gazetteer,
    NavigationIntent, OnboardingPhase, OnboardingTimer, RejectReason, RoutePicker,
    TariffFareProvider, TripParams, VehicleKind,
};
use farewheel_core::carousel::PointerPhase;
use ratatui::layout::{Position, Rect};
use tracing::{debug, warn};

use crate::input::{Action, PointerInput};
use crate::motion::SlideAnimator;
use crate::theme::Theme;

/// Minutes added or removed per waiting-time keypress
pub const WAITING_STEP_MINUTES: u32 = 5;
/// Distance used until the user picks one
pub const DEFAULT_DISTANCE_KM: f64 = 5.0;

/// Text entry state for the distance popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistancePrompt {
    pub input: String,
    pub error: Option<String>,
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing cards or reading a fare
    Normal,
    DistancePrompt(DistancePrompt),
}

/// Result of a distance prompt
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceAnswer {
    pub km: f64,
    /// Resolved place names when the answer came from a route
    pub route: Option<(String, String)>,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub carousel: Carousel,
    pub onboarding: OnboardingTimer,
    flags: Box<dyn FlagStore>,
    fares: Box<dyn FareProvider>,
    pub gazetteer: Gazetteer,
    pub trip: TripParams,
    /// Breakdown for the active tab, recomputed when the tab or trip changes
    pub fare: Option<FareBreakdown>,
    pub mode: Mode,
    /// Card hit areas from the last frame
    pub card_areas: Vec<(usize, Rect)>,
    /// Tab hit areas from the last frame (expanded view only)
    pub tab_areas: Vec<(usize, Rect)>,
    pub slide: SlideAnimator,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        flags: Box<dyn FlagStore>,
        now: Instant,
    ) -> farewheel_core::Result<Self> {
        let carousel = Carousel::with_default_items(&config.gesture, &config.animation)?;
        let onboarding = OnboardingTimer::start(&config.onboarding, flags.as_ref(), now);
        let departure = Local::now().time().with_second(0).unwrap_or_default();

        Ok(Self {
            theme: Theme::default(),
            carousel,
            onboarding,
            flags,
            fares: Box::new(TariffFareProvider::new(config.fares.clone())),
            gazetteer: Gazetteer::default(),
            trip: TripParams::new(DEFAULT_DISTANCE_KM, departure),
            fare: None,
            mode: Mode::Normal,
            card_areas: Vec::new(),
            tab_areas: Vec::new(),
            slide: SlideAnimator::new(&config.animation),
            status_message: None,
            should_quit: false,
            config,
        })
    }

    /// Kind shown by the fare view
    pub fn active_kind(&self) -> VehicleKind {
        let tab = self.carousel.state().active_tab();
        self.carousel.items()[tab].kind
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::DistancePrompt(_))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        hit_test(&self.card_areas, column, row)
    }

    pub fn tab_at(&self, column: u16, row: u16) -> Option<usize> {
        hit_test(&self.tab_areas, column, row)
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Previous => {
                self.apply_keyboard(NavigationIntent::Navigate(farewheel_core::Direction::Previous), now)
            }
            Action::Next => {
                self.apply_keyboard(NavigationIntent::Navigate(farewheel_core::Direction::Next), now)
            }
            Action::Open => {
                let front = self.carousel.state().front();
                self.apply_keyboard(NavigationIntent::Open(front), now);
            }
            Action::Close => self.apply_keyboard(NavigationIntent::Close, now),
            Action::SelectTab(tab) => self.apply_keyboard(NavigationIntent::SelectTab(tab), now),
            Action::OpenDistancePrompt => {
                self.mode = Mode::DistancePrompt(DistancePrompt::default());
            }
            Action::ToggleNight => self.toggle_night(),
            Action::WaitingMore => {
                self.trip.waiting_minutes = self.trip.waiting_minutes.saturating_add(WAITING_STEP_MINUTES);
                self.set_status(format!("Waiting {} min", self.trip.waiting_minutes));
            }
            Action::WaitingLess => {
                self.trip.waiting_minutes = self.trip.waiting_minutes.saturating_sub(WAITING_STEP_MINUTES);
                self.set_status(format!("Waiting {} min", self.trip.waiting_minutes));
            }
            Action::Confirm => self.submit_distance(),
            Action::Cancel => self.mode = Mode::Normal,
            Action::InputChar(c) => {
                if let Mode::DistancePrompt(prompt) = &mut self.mode {
                    prompt.input.push(c);
                    prompt.error = None;
                }
            }
            Action::Backspace => {
                if let Mode::DistancePrompt(prompt) = &mut self.mode {
                    prompt.input.pop();
                    prompt.error = None;
                }
            }
            Action::None => {}
        }
        self.sync(now);
    }

    /// Forward a translated mouse event to the carousel
    pub fn handle_pointer(&mut self, input: PointerInput, now: Instant) {
        if self.is_input_mode() {
            return;
        }
        match input {
            PointerInput::Down(position) => self.carousel.pointer_down(position, now),
            PointerInput::Move(position) => {
                self.carousel.pointer_move(position, now);
            }
            PointerInput::Up { position, target } => {
                self.carousel.pointer_up(position, target, now);
            }
            PointerInput::Wheel(delta) => {
                let disposition = self.carousel.wheel(delta, now);
                debug!(?disposition, delta, "Wheel");
            }
            PointerInput::Tab(tab) => {
                self.carousel.select_tab(tab, now);
            }
            PointerInput::None => {}
        }
        self.sync(now);
    }

    /// Fire due timers and advance animations
    pub fn tick(&mut self, now: Instant) {
        for delta in self.carousel.tick(now) {
            debug!(?delta, "Timer-driven navigation");
        }
        if let Some(phase) = self.onboarding.tick(now, self.flags.as_mut()) {
            debug!(?phase, "Onboarding hint");
        }
        self.slide.update(now);
        self.sync(now);
    }

    /// Earliest pending carousel or onboarding timer
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.carousel.next_deadline(), self.onboarding.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether the next frame should be drawn at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.slide.is_animating() || self.carousel.arbiter().phase() == PointerPhase::Dragging
    }

    pub fn show_onboarding_hint(&self) -> bool {
        self.onboarding.is_visible()
    }

    /// Cancel every timer before the terminal is restored
    pub fn teardown(&mut self) {
        self.carousel.teardown();
        self.onboarding.teardown();
        self.slide.cancel();
        if self.onboarding.phase() == OnboardingPhase::Cancelled {
            debug!("Onboarding hint interrupted, will show again next launch");
        }
    }

    fn apply_keyboard(&mut self, intent: NavigationIntent, now: Instant) {
        let delta = self.carousel.apply(intent, now);
        if let Some(reason) = delta.rejection() {
            self.set_status(rejection_message(reason));
        } else {
            self.clear_status();
        }
    }

    /// Pick up a new pulse and keep the fare in step with the active tab
    fn sync(&mut self, now: Instant) {
        self.slide.observe(self.carousel.snapshot().pulse, now);
        if self.carousel.state().is_expanded() {
            self.refresh_fare();
        }
    }

    fn refresh_fare(&mut self) {
        let kind = self.active_kind();
        let stale = self
            .fare
            .as_ref()
            .map_or(true, |fare| fare.kind != kind || fare.trip != self.trip);
        if !stale {
            return;
        }
        match self.fares.breakdown(kind, &self.trip) {
            Ok(fare) => self.fare = Some(fare),
            Err(e) => {
                warn!("Fare calculation failed: {}", e);
                self.fare = None;
                self.set_status(format!("Fare unavailable: {}", e));
            }
        }
    }

    fn toggle_night(&mut self) {
        let tariff = self.config.fares.tariff(self.active_kind());
        let (start, end) = (tariff.night_start, tariff.night_end);
        self.trip.departure = if in_night_window(self.trip.departure, start, end) {
            hour(12)
        } else {
            hour(start)
        };
        self.set_status(format!("Departure {}", self.trip.departure.format("%H:%M")));
    }

    fn submit_distance(&mut self) {
        let Mode::DistancePrompt(prompt) = &mut self.mode else {
            return;
        };
        match parse_distance_input(&prompt.input, &self.gazetteer) {
            Ok(answer) => {
                self.trip.distance_km = answer.km;
                self.mode = Mode::Normal;
                let message = match answer.route {
                    Some((from, to)) => format!("{} to {}: {:.2} km", from, to, answer.km),
                    None => format!("Distance {:.2} km", answer.km),
                };
                self.set_status(message);
            }
            Err(e) => prompt.error = Some(e.to_string()),
        }
    }
}

/// Accepts a distance in km ("12.5") or a route between two known places
/// ("Kochi to Thrissur", "Kochi - Thrissur").
pub fn parse_distance_input(
    input: &str,
    gazetteer: &Gazetteer,
) -> farewheel_core::Result<DistanceAnswer> {
    let input = input.trim();
    if let Ok(km) = input.parse::<f64>() {
        if km.is_finite() && km >= 0.0 {
            return Ok(DistanceAnswer { km, route: None });
        }
        return Err(farewheel_core::Error::InvalidTrip(format!(
            "distance must be a non-negative number, got {}",
            input
        )));
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let (from, to) = match words.iter().position(|w| w.eq_ignore_ascii_case("to")) {
        Some(i) => (words[..i].join(" "), words[i + 1..].join(" ")),
        None => input
            .split_once('-')
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .ok_or_else(|| {
                farewheel_core::Error::Other(
                    "enter a distance in km or \"<place> to <place>\"".to_string(),
                )
            })?,
    };

    let start = gazetteer.search(&from)?;
    let end = gazetteer.search(&to)?;

    let mut picker = RoutePicker::default();
    picker.tap(start.point)?;
    if picker.tap(end.point)? != TapOutcome::EndSet {
        return Err(farewheel_core::Error::Other("route end was not placed".to_string()));
    }
    let km = picker
        .picked_distance()
        .ok_or_else(|| farewheel_core::Error::Other("route is incomplete".to_string()))?;

    Ok(DistanceAnswer {
        km,
        route: Some((start.name.to_string(), end.name.to_string())),
    })
}

fn rejection_message(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Expanded => "Close the fare view first (Esc)",
        RejectReason::Collapsed => "Nothing to close",
        RejectReason::NotFront => "Only the front card can be opened",
        RejectReason::OutOfRange => "No such card",
    }
}

fn hit_test(areas: &[(usize, Rect)], column: u16, row: u16) -> Option<usize> {
    let position = Position::new(column, row);
    areas
        .iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(index, _)| *index)
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h % 24, 0, 0).unwrap_or_default()
}
