//! Straight-line drive-time estimate.
//!
//! No routing: distance is divided by an assumed average speed for the
//! market's metro classification.

use territory_core::MetroType;

/// Assumed average road speed, in miles per hour.
#[must_use]
pub fn average_speed_mph(metro: MetroType) -> f64 {
    match metro {
        MetroType::Urban => 25.0,
        MetroType::Rural => 45.0,
        MetroType::Suburban | MetroType::Unknown => 35.0,
    }
}

/// Estimated minutes to drive `distance_miles` in a `metro` market.
#[must_use]
pub fn drive_time_minutes(distance_miles: f64, metro: MetroType) -> f64 {
    distance_miles / average_speed_mph(metro) * 60.0
}
