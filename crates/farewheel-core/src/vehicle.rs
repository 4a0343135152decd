use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of service offered on a carousel card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Auto,
    Bus,
    Taxi,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Auto, VehicleKind::Bus, VehicleKind::Taxi];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Auto => "auto",
            VehicleKind::Bus => "bus",
            VehicleKind::Taxi => "taxi",
        }
    }

    /// Card title shown in the carousel
    pub fn title(&self) -> &'static str {
        match self {
            VehicleKind::Auto => "Auto Rikshaw",
            VehicleKind::Bus => "Bus",
            VehicleKind::Taxi => "Taxi",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "autorickshaw" | "auto-rickshaw" | "rickshaw" => Ok(VehicleKind::Auto),
            "bus" => Ok(VehicleKind::Bus),
            "taxi" | "car" | "cab" => Ok(VehicleKind::Taxi),
            other => Err(crate::Error::Other(format!("Unknown vehicle kind: {}", other))),
        }
    }
}
