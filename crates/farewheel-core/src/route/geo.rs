use serde::{Deserialize, Serialize};

/// Mean earth radius (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in km
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Rectangular service area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    pub fn check(&self, point: GeoPoint) -> crate::Result<GeoPoint> {
        if self.contains(point) {
            Ok(point)
        } else {
            Err(crate::Error::OutOfBounds {
                lat: point.lat,
                lng: point.lng,
            })
        }
    }
}

/// Kerala
pub const SERVICE_BOUNDS: Bounds = Bounds {
    min_lat: 8.2,
    max_lat: 12.8,
    min_lng: 74.8,
    max_lng: 77.4,
};

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Haversine distance rounded for display and fare input
pub fn route_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    (haversine_km(a, b) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_latitude() {
        let d = route_distance_km(GeoPoint::new(10.0, 76.0), GeoPoint::new(11.0, 76.0));
        assert_eq!(d, 111.2);
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = GeoPoint::new(9.9312, 76.2673);
        assert_eq!(route_distance_km(p, p), 0.0);
    }

    #[test]
    fn test_bounds() {
        assert!(SERVICE_BOUNDS.contains(GeoPoint::new(9.9312, 76.2673)));
        assert!(SERVICE_BOUNDS.contains(GeoPoint::new(8.2, 74.8)));
        assert!(!SERVICE_BOUNDS.contains(GeoPoint::new(13.0827, 80.2707)));
        assert!(matches!(
            SERVICE_BOUNDS.check(GeoPoint::new(8.0, 76.0)),
            Err(crate::Error::OutOfBounds { .. })
        ));
    }
}
