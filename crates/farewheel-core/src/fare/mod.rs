mod models;
mod tariff;

pub use models::{receipt_number, FareBreakdown, FareLine, TripParams};
pub use tariff::{
    in_night_window, TariffFareProvider, ADDITIONAL_DISTANCE, MINIMUM_FARE, NIGHT_SURCHARGE,
    WAITING_CHARGE,
};

use crate::vehicle::VehicleKind;

/// Source of itemised fares shown in the expanded view
pub trait FareProvider {
    fn breakdown(&self, kind: VehicleKind, trip: &TripParams) -> crate::Result<FareBreakdown>;
}
