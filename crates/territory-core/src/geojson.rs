//! Boundary extraction from the GeoJSON stored on territory rows.
//!
//! The data store is inconsistent about shape: the column may hold a JSON
//! string or an object, and the object may be a `FeatureCollection`, a
//! `Feature`, or a bare geometry. Only the outer ring of the first polygon is
//! used for targeting.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::types::GeoPoint;

/// Why a territory has no usable boundary.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("no geometry stored")]
    Absent,

    #[error("geometry JSON could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported geometry type")]
    Unsupported,

    #[error("position has fewer than two components")]
    ShortPosition,

    #[error("ring has {count} usable vertices; at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("coordinate [{lng}, {lat}] is outside the valid range")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// GeoJSON position: `[lng, lat]` plus an optional ignored altitude.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection {
        #[serde(default)]
        features: Vec<Feature>,
    },
    Feature {
        geometry: Option<Geometry>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Other,
}

/// Extract the outer boundary ring from a stored GeoJSON value.
///
/// A `FeatureCollection` contributes its *last* feature, since the editor
/// appends each saved revision. `Polygon` yields `coordinates[0]` and
/// `MultiPolygon` yields `coordinates[0][0]`.
///
/// # Errors
///
/// Returns a [`BoundaryError`] describing why the value holds no usable ring.
pub fn extract_boundary(raw: Option<&Value>) -> Result<Vec<GeoPoint>, BoundaryError> {
    let document: Document = match raw {
        None | Some(Value::Null) => return Err(BoundaryError::Absent),
        Some(Value::String(text)) if text.trim().is_empty() => return Err(BoundaryError::Absent),
        Some(Value::String(text)) => serde_json::from_str(text)?,
        Some(other) => Document::deserialize(other)?,
    };

    let geometry = match document {
        Document::FeatureCollection { mut features } => features
            .pop()
            .and_then(|f| f.geometry)
            .ok_or(BoundaryError::Absent)?,
        Document::Feature { geometry } => geometry.ok_or(BoundaryError::Absent)?,
        Document::Polygon { coordinates } => Geometry::Polygon { coordinates },
        Document::MultiPolygon { coordinates } => Geometry::MultiPolygon { coordinates },
        Document::Other => return Err(BoundaryError::Unsupported),
    };

    let ring = match geometry {
        Geometry::Polygon { coordinates } => coordinates.into_iter().next(),
        Geometry::MultiPolygon { coordinates } => coordinates
            .into_iter()
            .next()
            .and_then(|polygon| polygon.into_iter().next()),
        Geometry::Other => return Err(BoundaryError::Unsupported),
    }
    .unwrap_or_default();

    ring_to_points(&ring)
}

fn ring_to_points(ring: &[Position]) -> Result<Vec<GeoPoint>, BoundaryError> {
    let mut points = Vec::with_capacity(ring.len());
    for position in ring {
        let [lng, lat, ..] = position.as_slice() else {
            return Err(BoundaryError::ShortPosition);
        };
        points.push(GeoPoint::new(*lat, *lng));
    }

    validate_ring(&points)?;
    Ok(points)
}

/// Checks that `ring` can serve as a territory boundary: every vertex is a
/// valid coordinate and at least 3 vertices are distinct.
///
/// # Errors
///
/// [`BoundaryError::InvalidCoordinate`] for the first out-of-range or
/// non-finite vertex, [`BoundaryError::TooFewVertices`] otherwise.
pub fn validate_ring(ring: &[GeoPoint]) -> Result<(), BoundaryError> {
    if let Some(bad) = ring.iter().find(|p| !p.is_valid()) {
        return Err(BoundaryError::InvalidCoordinate {
            lat: bad.lat,
            lng: bad.lng,
        });
    }

    let count = distinct_vertex_count(ring);
    if count < 3 {
        return Err(BoundaryError::TooFewVertices { count });
    }
    Ok(())
}

/// Number of distinct vertices; the closing repeat of the first vertex and
/// any other exact duplicates count once.
fn distinct_vertex_count(ring: &[GeoPoint]) -> usize {
    ring.iter()
        .map(|p| (p.lat.to_bits(), p.lng.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[-84.0, 33.0], [-83.0, 33.0], [-83.0, 34.0], [-84.0, 34.0], [-84.0, 33.0]]]
        })
    }

    #[test]
    fn bare_polygon_yields_outer_ring() {
        let ring = extract_boundary(Some(&square())).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], GeoPoint::new(33.0, -84.0));
        assert_eq!(ring[2], GeoPoint::new(34.0, -83.0));
    }

    #[test]
    fn stringified_feature_is_parsed() {
        let raw = Value::String(json!({ "type": "Feature", "geometry": square() }).to_string());
        let ring = extract_boundary(Some(&raw)).unwrap();
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn feature_collection_uses_last_feature() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": square() },
                { "type": "Feature", "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }}
            ]
        });
        let ring = extract_boundary(Some(&raw)).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], GeoPoint::new(0.0, 1.0));
    }

    #[test]
    fn multipolygon_uses_first_polygon_outer_ring() {
        let raw = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[-84.0, 33.0], [-83.0, 33.0], [-83.0, 34.0], [-84.0, 33.0]]],
                [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 10.0]]]
            ]
        });
        let ring = extract_boundary(Some(&raw)).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], GeoPoint::new(33.0, -84.0));
    }

    #[test]
    fn altitude_is_ignored() {
        let raw = json!({
            "type": "Polygon",
            "coordinates": [[[-84.0, 33.0, 200.0], [-83.0, 33.0, 210.0], [-83.0, 34.0, 190.0], [-84.0, 33.0, 200.0]]]
        });
        assert_eq!(extract_boundary(Some(&raw)).unwrap().len(), 4);
    }

    #[test]
    fn missing_or_null_geometry_is_absent() {
        assert!(matches!(extract_boundary(None), Err(BoundaryError::Absent)));
        assert!(matches!(
            extract_boundary(Some(&Value::Null)),
            Err(BoundaryError::Absent)
        ));
        assert!(matches!(
            extract_boundary(Some(&json!({ "type": "Feature", "geometry": null }))),
            Err(BoundaryError::Absent)
        ));
        assert!(matches!(
            extract_boundary(Some(&json!({ "type": "FeatureCollection", "features": [] }))),
            Err(BoundaryError::Absent)
        ));
    }

    #[test]
    fn point_geometry_is_unsupported() {
        let raw = json!({ "type": "Point", "coordinates": [-84.0, 33.0] });
        assert!(matches!(
            extract_boundary(Some(&raw)),
            Err(BoundaryError::Unsupported)
        ));
    }

    #[test]
    fn garbage_string_is_malformed() {
        let raw = Value::String("{not json".to_string());
        assert!(matches!(
            extract_boundary(Some(&raw)),
            Err(BoundaryError::Malformed(_))
        ));
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let raw = json!({
            "type": "Polygon",
            "coordinates": [[[-84.0, 33.0], [-83.0, 33.0], [-84.0, 33.0]]]
        });
        assert!(matches!(
            extract_boundary(Some(&raw)),
            Err(BoundaryError::TooFewVertices { count: 2 })
        ));
    }

    #[test]
    fn repeated_vertices_count_once() {
        let a = GeoPoint::new(33.0, -84.0);
        let b = GeoPoint::new(33.0, -83.0);
        let c = GeoPoint::new(34.0, -83.0);
        assert!(matches!(
            validate_ring(&[a, b, b, a]),
            Err(BoundaryError::TooFewVertices { count: 2 })
        ));
        assert!(validate_ring(&[a, b, c, a]).is_ok());
        assert!(validate_ring(&[a, b, c]).is_ok());
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let ring = [
            GeoPoint::new(33.0, -84.0),
            GeoPoint::new(f64::NAN, -83.0),
            GeoPoint::new(34.0, -83.0),
        ];
        assert!(matches!(
            validate_ring(&ring),
            Err(BoundaryError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let raw = json!({
            "type": "Polygon",
            "coordinates": [[[-84.0, 33.0], [-83.0, 95.0], [-83.0, 34.0], [-84.0, 33.0]]]
        });
        assert!(matches!(
            extract_boundary(Some(&raw)),
            Err(BoundaryError::InvalidCoordinate { .. })
        ));
    }
}
