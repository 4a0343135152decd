use chrono::{NaiveTime, Timelike};
use tracing::debug;

use crate::config::{FaresConfig, TariffConfig};
use crate::vehicle::VehicleKind;

use super::models::{round2, FareBreakdown, FareLine, TripParams};
use super::FareProvider;

pub const MINIMUM_FARE: &str = "Minimum fare";
pub const ADDITIONAL_DISTANCE: &str = "Additional distance";
pub const NIGHT_SURCHARGE: &str = "Night surcharge";
pub const WAITING_CHARGE: &str = "Waiting charge";

/// Fares computed from the `[fares]` config tables
#[derive(Debug, Clone, Default)]
pub struct TariffFareProvider {
    fares: FaresConfig,
}

impl TariffFareProvider {
    pub fn new(fares: FaresConfig) -> Self {
        Self { fares }
    }

    pub fn fares(&self) -> &FaresConfig {
        &self.fares
    }
}

impl FareProvider for TariffFareProvider {
    fn breakdown(&self, kind: VehicleKind, trip: &TripParams) -> crate::Result<FareBreakdown> {
        trip.validate()?;
        let lines = fare_lines(self.fares.tariff(kind), trip);
        let breakdown = FareBreakdown::new(kind, *trip, lines);
        debug!(%kind, distance_km = trip.distance_km, total = breakdown.total(), "Computed fare");
        Ok(breakdown)
    }
}

/// Whether `time` falls inside `[start, end)`. A window with `start > end`
/// wraps midnight; `start == end` is empty.
pub fn in_night_window(time: NaiveTime, start: u32, end: u32) -> bool {
    let hour = time.hour();
    if start <= end {
        start <= hour && hour < end
    } else {
        hour >= start || hour < end
    }
}

fn fare_lines(tariff: &TariffConfig, trip: &TripParams) -> Vec<FareLine> {
    let mut lines = vec![FareLine::new(
        MINIMUM_FARE,
        tariff.minimum_fare,
        format!("Covers the first {} km", tariff.minimum_km),
    )];

    if trip.distance_km > tariff.minimum_km {
        let extra_km = trip.distance_km - tariff.minimum_km;
        lines.push(
            FareLine::new(
                ADDITIONAL_DISTANCE,
                extra_km * tariff.per_km,
                "Charged per km beyond the minimum distance",
            )
            .with_details(format!("{:.2} km x {:.2}/km", extra_km, tariff.per_km)),
        );
    }

    if tariff.night_surcharge_pct > 0.0
        && in_night_window(trip.departure, tariff.night_start, tariff.night_end)
    {
        let base: f64 = lines.iter().map(|l| l.amount).sum();
        lines.push(
            FareLine::new(
                NIGHT_SURCHARGE,
                base * tariff.night_surcharge_pct / 100.0,
                format!(
                    "{:02}:00 to {:02}:00 departures",
                    tariff.night_start, tariff.night_end
                ),
            )
            .with_details(format!(
                "{}% of {:.2}",
                tariff.night_surcharge_pct,
                round2(base)
            )),
        );
    }

    if trip.waiting_minutes > 0 && tariff.waiting_per_15_min > 0.0 {
        let blocks = trip.waiting_minutes.div_ceil(15);
        lines.push(
            FareLine::new(
                WAITING_CHARGE,
                f64::from(blocks) * tariff.waiting_per_15_min,
                "Charged per started 15 minutes of waiting",
            )
            .with_details(format!(
                "{} min ({} x {:.2})",
                trip.waiting_minutes, blocks, tariff.waiting_per_15_min
            )),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn provider() -> TariffFareProvider {
        TariffFareProvider::default()
    }

    #[test]
    fn test_short_trip_is_minimum_fare() {
        let fare = provider()
            .breakdown(VehicleKind::Auto, &TripParams::new(1.0, at(12, 0)))
            .unwrap();
        assert_eq!(fare.lines.len(), 1);
        assert_eq!(fare.lines[0].label, MINIMUM_FARE);
        assert_eq!(fare.total(), 30.0);
        assert_eq!(fare.title(), "Auto Fare");
    }

    #[test]
    fn test_additional_distance() {
        let fare = provider()
            .breakdown(VehicleKind::Auto, &TripParams::new(5.5, at(12, 0)))
            .unwrap();
        // (5.5 - 1.5) * 15
        assert_eq!(fare.line(ADDITIONAL_DISTANCE).unwrap().amount, 60.0);
        assert_eq!(fare.total(), 90.0);
    }

    #[test]
    fn test_night_surcharge_applies_to_base() {
        let fare = provider()
            .breakdown(VehicleKind::Auto, &TripParams::new(5.5, at(23, 30)))
            .unwrap();
        assert_eq!(fare.line(NIGHT_SURCHARGE).unwrap().amount, 45.0);
        assert_eq!(fare.total(), 135.0);

        // Bus has no surcharge configured
        let bus = provider()
            .breakdown(VehicleKind::Bus, &TripParams::new(5.5, at(23, 30)))
            .unwrap();
        assert!(bus.line(NIGHT_SURCHARGE).is_none());
        assert_eq!(bus.title(), "Bus Fare");
    }

    #[test]
    fn test_waiting_rounds_up_to_block() {
        let trip = TripParams::new(2.0, at(9, 0)).with_waiting(16);
        let fare = provider().breakdown(VehicleKind::Taxi, &trip).unwrap();
        assert_eq!(fare.line(WAITING_CHARGE).unwrap().amount, 25.0);
        assert_eq!(fare.total(), 225.0);
        assert_eq!(
            fare.lines.iter().map(|l| l.label.as_str()).collect::<Vec<_>>(),
            vec![MINIMUM_FARE, WAITING_CHARGE]
        );
    }

    #[test]
    fn test_night_window_wraps_midnight() {
        assert!(in_night_window(at(22, 0), 22, 5));
        assert!(in_night_window(at(0, 30), 22, 5));
        assert!(in_night_window(at(4, 59), 22, 5));
        assert!(!in_night_window(at(5, 0), 22, 5));
        assert!(!in_night_window(at(21, 59), 22, 5));
        assert!(in_night_window(at(1, 0), 0, 6));
        assert!(!in_night_window(at(1, 0), 3, 3));
    }

    #[test]
    fn test_invalid_distance_rejected() {
        let err = provider()
            .breakdown(VehicleKind::Taxi, &TripParams::new(-2.0, at(9, 0)))
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidTrip(_)));
    }
}
