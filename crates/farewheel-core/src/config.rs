use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::vehicle::VehicleKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub fares: FaresConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (holds state.json and the log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Thresholds used to classify pointer and wheel input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Release speed (units per second) a drag must exceed to navigate
    #[serde(default = "default_flick_velocity_threshold")]
    pub flick_velocity_threshold: f64,
    /// Distance a press must move beyond before it counts as a drag
    #[serde(default)]
    pub drag_slop: f64,
    /// A release later than this after the last movement has zero velocity
    #[serde(default = "default_velocity_window")]
    pub velocity_window_ms: u64,
    /// Accumulated wheel delta a debounce window must exceed to navigate
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
    /// Quiet period after the last wheel event before the decision is made
    #[serde(default = "default_scroll_debounce")]
    pub scroll_debounce_ms: u64,
    /// Delta fed into the accumulator per terminal wheel notch
    #[serde(default = "default_wheel_notch_delta")]
    pub wheel_notch_delta: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flick_velocity_threshold: default_flick_velocity_threshold(),
            drag_slop: 0.0,
            velocity_window_ms: default_velocity_window(),
            scroll_threshold: default_scroll_threshold(),
            scroll_debounce_ms: default_scroll_debounce(),
            wheel_notch_delta: default_wheel_notch_delta(),
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let non_negative = [
            ("flick_velocity_threshold", self.flick_velocity_threshold),
            ("drag_slop", self.drag_slop),
            ("scroll_threshold", self.scroll_threshold),
            ("wheel_notch_delta", self.wheel_notch_delta),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::Config(format!(
                    "gesture.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.scroll_debounce_ms == 0 {
            return Err(crate::Error::Config(
                "gesture.scroll_debounce_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn velocity_window(&self) -> Duration {
        Duration::from_millis(self.velocity_window_ms)
    }
}

/// Easing curve used by the slide animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// How long a swipe pulse stays active after a navigation
    #[serde(default = "default_pulse_duration")]
    pub pulse_duration_ms: u64,
    /// Card slide duration in milliseconds (0 disables the slide)
    #[serde(default = "default_slide_duration")]
    pub slide_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate used while an animation or timer is pending
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            pulse_duration_ms: default_pulse_duration(),
            slide_duration_ms: default_slide_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl AnimationConfig {
    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }

    /// Check if card slides are animated
    pub fn is_smooth(&self) -> bool {
        self.easing != EasingType::None && self.slide_duration_ms > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    /// Show the first-run swipe hint
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_show_delay")]
    pub show_delay_ms: u64,
    #[serde(default = "default_visible")]
    pub visible_ms: u64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            show_delay_ms: default_show_delay(),
            visible_ms: default_visible(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// Tariff for a single vehicle kind. Amounts are in rupees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    pub minimum_fare: f64,
    /// Distance covered by the minimum fare
    pub minimum_km: f64,
    pub per_km: f64,
    #[serde(default)]
    pub night_surcharge_pct: f64,
    /// Hour (0-23) the night window opens
    #[serde(default = "default_night_start")]
    pub night_start: u32,
    /// Hour (0-23) the night window closes; may be earlier than `night_start`
    #[serde(default = "default_night_end")]
    pub night_end: u32,
    #[serde(default)]
    pub waiting_per_15_min: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaresConfig {
    #[serde(default = "default_auto_tariff")]
    pub auto: TariffConfig,
    #[serde(default = "default_bus_tariff")]
    pub bus: TariffConfig,
    #[serde(default = "default_taxi_tariff")]
    pub taxi: TariffConfig,
}

impl Default for FaresConfig {
    fn default() -> Self {
        Self {
            auto: default_auto_tariff(),
            bus: default_bus_tariff(),
            taxi: default_taxi_tariff(),
        }
    }
}

impl FaresConfig {
    pub fn tariff(&self, kind: VehicleKind) -> &TariffConfig {
        match kind {
            VehicleKind::Auto => &self.auto,
            VehicleKind::Bus => &self.bus,
            VehicleKind::Taxi => &self.taxi,
        }
    }
}

fn default_auto_tariff() -> TariffConfig {
    TariffConfig {
        minimum_fare: 30.0,
        minimum_km: 1.5,
        per_km: 15.0,
        night_surcharge_pct: 50.0,
        night_start: default_night_start(),
        night_end: default_night_end(),
        waiting_per_15_min: 10.0,
    }
}

fn default_bus_tariff() -> TariffConfig {
    TariffConfig {
        minimum_fare: 10.0,
        minimum_km: 2.5,
        per_km: 1.0,
        night_surcharge_pct: 0.0,
        night_start: default_night_start(),
        night_end: default_night_end(),
        waiting_per_15_min: 0.0,
    }
}

fn default_taxi_tariff() -> TariffConfig {
    TariffConfig {
        minimum_fare: 200.0,
        minimum_km: 5.0,
        per_km: 18.0,
        night_surcharge_pct: 20.0,
        night_start: default_night_start(),
        night_end: default_night_end(),
        waiting_per_15_min: 12.5,
    }
}

fn default_night_start() -> u32 {
    22
}

fn default_night_end() -> u32 {
    5
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("farewheel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_flick_velocity_threshold() -> f64 {
    10.0
}

fn default_velocity_window() -> u64 {
    100
}

fn default_scroll_threshold() -> f64 {
    50.0
}

fn default_scroll_debounce() -> u64 {
    100
}

fn default_wheel_notch_delta() -> f64 {
    60.0 // one notch is enough to cross the scroll threshold
}

fn default_pulse_duration() -> u64 {
    500
}

fn default_slide_duration() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

fn default_show_delay() -> u64 {
    1500
}

fn default_visible() -> u64 {
    3000
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            config.gesture.validate()?;
            tracing::info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/farewheel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("farewheel")
            .join("config.toml")
    }

    /// Get the persisted flag file path
    pub fn state_path(&self) -> PathBuf {
        self.data_dir().join("state.json")
    }

    /// Get the log file path used by the interactive UI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("farewheel.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
