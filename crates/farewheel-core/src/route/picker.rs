use tracing::debug;

use super::geo::{route_distance_km, Bounds, GeoPoint, SERVICE_BOUNDS};

/// What a map tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    StartSet,
    EndSet,
    /// Both markers already placed; drag one to move it
    Ignored,
}

/// Narrow interface the fare view uses to obtain a trip distance
pub trait DistancePicker {
    /// Distance in km once a pick is complete
    fn picked_distance(&self) -> Option<f64>;
    fn reset(&mut self);
}

/// Start/end marker placement within the service area
#[derive(Debug, Clone)]
pub struct RoutePicker {
    start: Option<GeoPoint>,
    end: Option<GeoPoint>,
    bounds: Bounds,
}

impl Default for RoutePicker {
    fn default() -> Self {
        Self::new(SERVICE_BOUNDS)
    }
}

impl RoutePicker {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            start: None,
            end: None,
            bounds,
        }
    }

    pub fn start(&self) -> Option<GeoPoint> {
        self.start
    }

    pub fn end(&self) -> Option<GeoPoint> {
        self.end
    }

    pub fn tap(&mut self, point: GeoPoint) -> crate::Result<TapOutcome> {
        let point = self.bounds.check(point)?;
        let outcome = match (self.start, self.end) {
            (None, _) => {
                self.start = Some(point);
                TapOutcome::StartSet
            }
            (Some(_), None) => {
                self.end = Some(point);
                TapOutcome::EndSet
            }
            (Some(_), Some(_)) => TapOutcome::Ignored,
        };
        debug!(?outcome, %point, "Route tap");
        Ok(outcome)
    }

    pub fn move_start(&mut self, point: GeoPoint) -> crate::Result<()> {
        self.start = Some(self.bounds.check(point)?);
        Ok(())
    }

    pub fn move_end(&mut self, point: GeoPoint) -> crate::Result<()> {
        self.end = Some(self.bounds.check(point)?);
        Ok(())
    }

    /// Route distance in km, once both markers exist
    pub fn proceed(&self) -> Option<f64> {
        Some(route_distance_km(self.start?, self.end?))
    }
}

impl DistancePicker for RoutePicker {
    fn picked_distance(&self) -> Option<f64> {
        self.proceed()
    }

    fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KOCHI: GeoPoint = GeoPoint::new(9.9312, 76.2673);
    const TVM: GeoPoint = GeoPoint::new(8.5241, 76.9366);
    const ERNAKULAM: GeoPoint = GeoPoint::new(9.9816, 76.2999);

    #[test]
    fn test_two_taps_then_proceed() {
        let mut picker = RoutePicker::default();
        assert_eq!(picker.proceed(), None);
        assert_eq!(picker.tap(KOCHI).unwrap(), TapOutcome::StartSet);
        assert_eq!(picker.proceed(), None);
        assert_eq!(picker.tap(TVM).unwrap(), TapOutcome::EndSet);
        assert_eq!(picker.proceed(), Some(172.85));
    }

    #[test]
    fn test_third_tap_ignored_and_drag_replaces() {
        let mut picker = RoutePicker::default();
        picker.tap(KOCHI).unwrap();
        picker.tap(TVM).unwrap();
        assert_eq!(picker.tap(ERNAKULAM).unwrap(), TapOutcome::Ignored);
        assert_eq!(picker.end(), Some(TVM));

        picker.move_end(ERNAKULAM).unwrap();
        assert_eq!(picker.picked_distance(), Some(6.64));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut picker = RoutePicker::default();
        let chennai = GeoPoint::new(13.0827, 80.2707);
        assert!(picker.tap(chennai).is_err());
        assert_eq!(picker.start(), None);
        picker.tap(KOCHI).unwrap();
        assert!(picker.move_start(chennai).is_err());
        assert_eq!(picker.start(), Some(KOCHI));
    }

    #[test]
    fn test_reset() {
        let mut picker = RoutePicker::default();
        picker.tap(KOCHI).unwrap();
        picker.tap(TVM).unwrap();
        picker.reset();
        assert_eq!(picker.picked_distance(), None);
        assert_eq!(picker.tap(TVM).unwrap(), TapOutcome::StartSet);
    }
}
