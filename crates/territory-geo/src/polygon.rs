//! Ring containment and bounding geometry.

use territory_core::GeoPoint;

use crate::distance::distance_miles;

/// Even-odd ray-casting containment test with `x = lng`, `y = lat`.
///
/// Rings with fewer than 3 vertices contain nothing. The result for a point
/// lying exactly on an edge or vertex is unspecified: it depends on which
/// half-open side of the crossing test the edge falls.
#[must_use]
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned lat/lng box around a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Physical size of a territory, in miles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerritoryExtent {
    pub width_miles: f64,
    pub height_miles: f64,
    /// `max(width_miles, height_miles)`; drives every size-tier decision.
    pub size_miles: f64,
}

impl BoundingBox {
    /// Returns `None` for an empty ring.
    #[must_use]
    pub fn from_ring(ring: &[GeoPoint]) -> Option<Self> {
        let first = ring.first()?;
        let init = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        Some(ring.iter().fold(init, |b, p| Self {
            min_lat: b.min_lat.min(p.lat),
            max_lat: b.max_lat.max(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lng: b.max_lng.max(p.lng),
        }))
    }

    /// Latitude span in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Width measured along the center's parallel, height along its meridian.
    #[must_use]
    pub fn extent(&self, center: GeoPoint) -> TerritoryExtent {
        let width_miles = distance_miles(
            GeoPoint::new(center.lat, self.min_lng),
            GeoPoint::new(center.lat, self.max_lng),
        );
        let height_miles = distance_miles(
            GeoPoint::new(self.min_lat, center.lng),
            GeoPoint::new(self.max_lat, center.lng),
        );
        TerritoryExtent {
            width_miles,
            height_miles,
            size_miles: width_miles.max(height_miles),
        }
    }
}
