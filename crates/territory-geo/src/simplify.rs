//! Douglas-Peucker ring simplification.
//!
//! Distances here are planar, in raw degrees. The output only decides which
//! vertices survive, so the lat/lng distortion does not matter.

use territory_core::GeoPoint;

const INITIAL_TOLERANCE: f64 = 0.001;
const GROW_FACTOR: f64 = 1.5;
const GROW_STEPS: usize = 20;
const SHRINK_FACTOR: f64 = 0.8;
const SHRINK_STEPS: usize = 10;
const MIN_TOLERANCE: f64 = 0.0001;
/// The shrink phase stops once the result reaches this share of the target.
const SHRINK_UNTIL_FRACTION: f64 = 0.8;

/// Planar distance from `point` to the closest point of segment `start..end`.
///
/// A zero-length segment measures the distance to `start`.
#[must_use]
pub fn perpendicular_distance(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    let (px, py) = (point.lng, point.lat);
    let (x1, y1) = (start.lng, start.lat);
    let (dx, dy) = (end.lng - x1, end.lat - y1);

    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let (cx, cy) = (x1 + t * dx, y1 + t * dy);
    (px - cx).hypot(py - cy)
}

/// Douglas-Peucker simplification at a fixed `tolerance`.
///
/// The first and last vertices always survive. Sequences of 2 or fewer
/// points are returned unchanged.
#[must_use]
pub fn simplify(ring: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    let n = ring.len();
    if n <= 2 {
        return ring.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    // Explicit work-list of (start, end) spans so pathological rings cannot
    // exhaust the call stack.
    let mut spans = vec![(0usize, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_idx = start;
        for (i, point) in ring.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(*point, ring[start], ring[end]);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            keep[max_idx] = true;
            spans.push((max_idx, end));
            spans.push((start, max_idx));
        }
    }

    ring.iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

/// Simplify toward roughly `target` vertices.
///
/// Rings already at or under the target are returned as-is. Otherwise the
/// tolerance grows by 1.5x (at most 20 steps) until the result fits, then
/// shrinks by 0.8x (at most 10 steps, never below 0.0001) while the result
/// is under 80% of the target. The final count is close to the target but
/// not guaranteed to equal it, and may exceed it if the shrink phase
/// overshoots.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn simplify_to_target(ring: &[GeoPoint], target: usize) -> Vec<GeoPoint> {
    if ring.len() <= target {
        return ring.to_vec();
    }

    let floor_count = target as f64 * SHRINK_UNTIL_FRACTION;

    let mut tolerance = INITIAL_TOLERANCE;
    let mut simplified = simplify(ring, tolerance);

    let mut steps = 0;
    while simplified.len() > target && steps < GROW_STEPS {
        tolerance *= GROW_FACTOR;
        simplified = simplify(ring, tolerance);
        steps += 1;
    }

    let mut steps = 0;
    while (simplified.len() as f64) < floor_count
        && tolerance > MIN_TOLERANCE
        && steps < SHRINK_STEPS
    {
        tolerance = (tolerance * SHRINK_FACTOR).max(MIN_TOLERANCE);
        simplified = simplify(ring, tolerance);
        steps += 1;
    }

    tracing::debug!(
        input = ring.len(),
        output = simplified.len(),
        target,
        tolerance,
        "simplified ring"
    );
    simplified
}
