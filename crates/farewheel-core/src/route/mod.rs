//! Trip distance selection: map markers and named places

mod gazetteer;
mod geo;
mod picker;

pub use gazetteer::{edit_distance, Gazetteer, Place};
pub use geo::{haversine_km, route_distance_km, Bounds, GeoPoint, EARTH_RADIUS_KM, SERVICE_BOUNDS};
pub use picker::{DistancePicker, RoutePicker, TapOutcome};
