//! Domain types shared by the geometry, targeting, and CLI crates.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite and inside the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Metro classification of a clinic's market.
///
/// Anything the data store sends that is not `urban`, `suburban`, or `rural`
/// collapses to [`MetroType::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MetroType {
    Urban,
    Suburban,
    Rural,
    #[default]
    Unknown,
}

impl MetroType {
    /// Parse a raw classification, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "urban" => MetroType::Urban,
            "suburban" => MetroType::Suburban,
            "rural" => MetroType::Rural,
            _ => MetroType::Unknown,
        }
    }
}

impl From<&str> for MetroType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for MetroType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl std::fmt::Display for MetroType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetroType::Urban => write!(f, "urban"),
            MetroType::Suburban => write!(f, "suburban"),
            MetroType::Rural => write!(f, "rural"),
            MetroType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A clinic service territory ready for targeting.
///
/// `boundary` is the outer ring in `[lng, lat]` source order converted to
/// [`GeoPoint`]s. It is `None` when the data store holds no usable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    pub id: String,
    pub name: String,
    pub state: Option<String>,
    pub metro_type: MetroType,
    pub center: GeoPoint,
    pub boundary: Option<Vec<GeoPoint>>,
}

/// Another clinic considered as a potential competitor.
///
/// Coordinates are optional because the location table is incomplete; use
/// [`SiblingTerritory::location`] to get a usable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiblingTerritory {
    pub id: String,
    pub name: String,
    pub state: Option<String>,
    #[serde(default)]
    pub metro_type: MetroType,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl SiblingTerritory {
    /// Returns the sibling's location when both coordinates are present and finite.
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint::new(lat, lng))
            }
            _ => None,
        }
    }
}
