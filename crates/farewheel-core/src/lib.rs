pub mod carousel;
pub mod config;
pub mod error;
pub mod fare;
pub mod flags;
pub mod onboarding;
pub mod route;
pub mod timer;
pub mod vehicle;

pub use carousel::{
    Carousel, CarouselItem, CarouselSnapshot, Direction, NavigationIntent, PointerPosition,
    RejectReason, StateDelta, SwipePulse, WheelDisposition,
};
pub use config::{AnimationConfig, AppConfig, EasingType, GestureConfig};
pub use error::{Error, Result};
pub use fare::{FareBreakdown, FareLine, FareProvider, TariffFareProvider, TripParams};
pub use flags::{FlagStore, JsonFlagStore, MemoryFlagStore, TUTORIAL_SHOWN_KEY};
pub use onboarding::{OnboardingPhase, OnboardingTimer};
pub use route::{DistancePicker, Gazetteer, GeoPoint, RoutePicker};
pub use vehicle::VehicleKind;
