//! Rejection sampling of inclusion and exclusion points around a territory.
//!
//! Both samplers draw from an injected [`Rng`] so callers can seed them.
//! Accepted points carry a ranking score that is dropped once selection is
//! done.

use rand::Rng;
use territory_core::GeoPoint;

use crate::distance::distance_miles;
use crate::polygon::{point_in_polygon, BoundingBox};

/// How far exclusion bands extend past the bounding box, as a fraction of
/// the box's span on that axis.
const EXCLUSION_BAND_FRACTION: f64 = 0.3;

/// Vertex exclusions closer than this to the center are skipped.
const VERTEX_EXCLUSION_MIN_MILES: f64 = 5.0;
/// Roughly how many vertices the vertex walk visits.
const VERTEX_EXCLUSION_STOPS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Trials per sampler before giving up.
    pub max_attempts: usize,
    /// Accepted points per sampler.
    pub target: usize,
    /// Minimum spacing between inclusions, as a fraction of territory size.
    pub spacing_factor: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            target: 10,
            spacing_factor: 0.15,
        }
    }
}

/// A sampled point plus the distance it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub point: GeoPoint,
    /// Miles from the center (inclusions) or nearest boundary vertex
    /// (exclusions).
    pub score_miles: f64,
}

/// Sample interior points spread across the territory.
///
/// Draws uniformly inside the bounding box and keeps points inside `ring`
/// until `config.target` are accepted or `config.max_attempts` trials are
/// spent. Accepted points are ordered nearest-to-center first and thinned by
/// [`spread_by_spacing`] with a minimum gap of
/// `territory_size_miles * config.spacing_factor`.
pub fn sample_interior<R: Rng>(
    ring: &[GeoPoint],
    center: GeoPoint,
    territory_size_miles: f64,
    config: &SamplerConfig,
    rng: &mut R,
) -> Vec<SamplePoint> {
    let Some(bounds) = BoundingBox::from_ring(ring) else {
        return Vec::new();
    };

    let mut accepted = Vec::with_capacity(config.target);
    let mut attempts = 0;
    while attempts < config.max_attempts && accepted.len() < config.target {
        attempts += 1;
        let candidate = GeoPoint::new(
            bounds.min_lat + bounds.lat_span() * rng.random::<f64>(),
            bounds.min_lng + bounds.lng_span() * rng.random::<f64>(),
        );
        if point_in_polygon(candidate, ring) {
            accepted.push(SamplePoint {
                point: candidate,
                score_miles: distance_miles(center, candidate),
            });
        }
    }

    sort_by_score(&mut accepted);
    let spread = spread_by_spacing(
        &accepted,
        territory_size_miles * config.spacing_factor,
        config.target,
    );

    tracing::debug!(
        attempts,
        accepted = accepted.len(),
        kept = spread.len(),
        "interior sampling finished"
    );
    spread
}

/// Greedy minimum-spacing filter.
///
/// Walks `points` in order and keeps each one that is at least
/// `min_spacing_miles` from every point already kept. The first point is
/// always kept. Stops once `limit` points are kept. The result depends on
/// input order; this is not an optimal dispersion.
#[must_use]
pub fn spread_by_spacing(
    points: &[SamplePoint],
    min_spacing_miles: f64,
    limit: usize,
) -> Vec<SamplePoint> {
    let mut kept: Vec<SamplePoint> = Vec::with_capacity(limit.min(points.len()));
    for candidate in points {
        if kept.len() >= limit {
            break;
        }
        let too_close = kept
            .iter()
            .any(|k| distance_miles(k.point, candidate.point) < min_spacing_miles);
        if !too_close {
            kept.push(*candidate);
        }
    }
    kept
}

/// Sample exterior points hugging the boundary.
///
/// Each trial picks one of four bands just outside the bounding box (north,
/// south, east, west; equal odds), each reaching 30% of the box span beyond
/// it. Points outside `ring` are accepted and ranked by distance to the
/// nearest boundary vertex; the closest `config.target` are returned.
/// Draws past the poles or the antimeridian are rejected.
pub fn sample_exterior<R: Rng>(
    ring: &[GeoPoint],
    config: &SamplerConfig,
    rng: &mut R,
) -> Vec<SamplePoint> {
    let Some(bounds) = BoundingBox::from_ring(ring) else {
        return Vec::new();
    };

    let mut accepted = Vec::with_capacity(config.target);
    let mut attempts = 0;
    while attempts < config.max_attempts && accepted.len() < config.target {
        attempts += 1;
        let candidate = exterior_candidate(&bounds, rng);
        if candidate.is_valid() && !point_in_polygon(candidate, ring) {
            accepted.push(SamplePoint {
                point: candidate,
                score_miles: nearest_vertex_miles(candidate, ring),
            });
        }
    }

    sort_by_score(&mut accepted);
    accepted.truncate(config.target);

    tracing::debug!(
        attempts,
        kept = accepted.len(),
        "exterior sampling finished"
    );
    accepted
}

fn exterior_candidate<R: Rng>(bounds: &BoundingBox, rng: &mut R) -> GeoPoint {
    let lat_span = bounds.lat_span();
    let lng_span = bounds.lng_span();
    let side = rng.random::<f64>();

    if side < 0.25 {
        // north
        GeoPoint::new(
            bounds.max_lat + lat_span * rng.random::<f64>() * EXCLUSION_BAND_FRACTION,
            bounds.min_lng + lng_span * rng.random::<f64>(),
        )
    } else if side < 0.5 {
        // south
        GeoPoint::new(
            bounds.min_lat - lat_span * rng.random::<f64>() * EXCLUSION_BAND_FRACTION,
            bounds.min_lng + lng_span * rng.random::<f64>(),
        )
    } else if side < 0.75 {
        // east
        GeoPoint::new(
            bounds.min_lat + lat_span * rng.random::<f64>(),
            bounds.max_lng + lng_span * rng.random::<f64>() * EXCLUSION_BAND_FRACTION,
        )
    } else {
        // west
        GeoPoint::new(
            bounds.min_lat + lat_span * rng.random::<f64>(),
            bounds.min_lng - lng_span * rng.random::<f64>() * EXCLUSION_BAND_FRACTION,
        )
    }
}

/// Distance in miles from `point` to the closest vertex of `ring`.
#[must_use]
pub fn nearest_vertex_miles(point: GeoPoint, ring: &[GeoPoint]) -> f64 {
    ring.iter()
        .map(|v| distance_miles(point, *v))
        .fold(f64::INFINITY, f64::min)
}

/// Boundary vertices usable as fixed exclusion anchors.
///
/// Visits every `max(1, n / 20)`-th vertex and keeps those more than 5 miles
/// from `center`.
#[must_use]
pub fn boundary_vertex_anchors(ring: &[GeoPoint], center: GeoPoint) -> Vec<GeoPoint> {
    let step = (ring.len() / VERTEX_EXCLUSION_STOPS).max(1);
    ring.iter()
        .step_by(step)
        .copied()
        .filter(|v| distance_miles(center, *v) > VERTEX_EXCLUSION_MIN_MILES)
        .collect()
}

fn sort_by_score(points: &mut [SamplePoint]) {
    points.sort_by(|a, b| a.score_miles.total_cmp(&b.score_miles));
}

#[cfg(test)]
#[path = "sampling_test.rs"]
mod tests;
