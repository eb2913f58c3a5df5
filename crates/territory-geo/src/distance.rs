//! Great-circle distance.

use territory_core::GeoPoint;

/// Mean Earth radius used for all mileage figures in exported documents.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points, in miles.
///
/// Symmetric and never negative; coincident points are `0.0` apart.
#[must_use]
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}
