use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleKind;

/// One card on the carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub id: String,
    pub kind: VehicleKind,
}

impl CarouselItem {
    pub fn new(id: impl Into<String>, kind: VehicleKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Auto-rickshaw, bus and taxi, in display order
pub fn default_items() -> Vec<CarouselItem> {
    VehicleKind::ALL
        .iter()
        .map(|kind| CarouselItem::new(kind.as_str(), *kind))
        .collect()
}
