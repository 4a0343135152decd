use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vehicle::VehicleKind;

/// Inputs to a fare calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripParams {
    pub distance_km: f64,
    pub departure: NaiveTime,
    #[serde(default)]
    pub waiting_minutes: u32,
}

impl TripParams {
    pub fn new(distance_km: f64, departure: NaiveTime) -> Self {
        Self {
            distance_km,
            departure,
            waiting_minutes: 0,
        }
    }

    pub fn with_waiting(mut self, minutes: u32) -> Self {
        self.waiting_minutes = minutes;
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(crate::Error::InvalidTrip(format!(
                "distance must be a non-negative number of km, got {}",
                self.distance_km
            )));
        }
        Ok(())
    }
}

/// One row of a fare breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareLine {
    pub label: String,
    pub amount: f64,
    /// Short explanation shown on hover/selection
    pub tooltip: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl FareLine {
    pub fn new(label: impl Into<String>, amount: f64, tooltip: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: round2(amount),
            tooltip: tooltip.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Itemised fare for one vehicle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub kind: VehicleKind,
    pub trip: TripParams,
    pub lines: Vec<FareLine>,
    pub receipt: String,
}

impl FareBreakdown {
    pub fn new(kind: VehicleKind, trip: TripParams, lines: Vec<FareLine>) -> Self {
        Self {
            kind,
            trip,
            lines,
            receipt: receipt_number(),
        }
    }

    pub fn total(&self) -> f64 {
        round2(self.lines.iter().map(|l| l.amount).sum())
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            VehicleKind::Auto => "Auto Fare",
            VehicleKind::Bus => "Bus Fare",
            VehicleKind::Taxi => "Taxi Fare",
        }
    }

    pub fn line(&self, label: &str) -> Option<&FareLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}

/// Six upper-case alphanumerics taken from a fresh v4 UUID
pub fn receipt_number() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
