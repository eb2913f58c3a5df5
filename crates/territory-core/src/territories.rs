use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::geojson::{extract_boundary, BoundaryError};
use crate::types::{GeoPoint, MetroType, SiblingTerritory, Territory};
use crate::ConfigError;

/// One clinic row as exported from the territory store.
///
/// The store merges two tables, so ids arrive as strings or numbers and
/// coordinates as numbers, numeric strings, or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinicRecord {
    #[serde(deserialize_with = "id_from_any")]
    pub clinic_id: String,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "coordinate_from_any")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coordinate_from_any")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub metro_type: Option<String>,
    #[serde(default)]
    pub raw_geojson: Option<Value>,
}

impl ClinicRecord {
    /// Display name, falling back to `Clinic <id>` when the row has none.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.clinic_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Clinic {}", self.clinic_id),
        }
    }

    #[must_use]
    pub fn metro(&self) -> MetroType {
        self.metro_type
            .as_deref()
            .map_or(MetroType::Unknown, MetroType::parse)
    }

    /// The clinic's own location, if both coordinates are usable.
    #[must_use]
    pub fn center(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)).filter(GeoPoint::is_valid),
            _ => None,
        }
    }

    /// Parse the stored boundary geometry.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] when the row has no usable outer ring.
    pub fn boundary(&self) -> Result<Vec<GeoPoint>, BoundaryError> {
        extract_boundary(self.raw_geojson.as_ref())
    }

    /// Build the targeting view of this clinic.
    ///
    /// Returns `None` when the clinic has no usable center. A missing or
    /// malformed boundary is kept as `boundary: None` so the caller can report
    /// it as such.
    #[must_use]
    pub fn territory(&self) -> Option<Territory> {
        let center = self.center()?;
        Some(Territory {
            id: self.clinic_id.clone(),
            name: self.display_name(),
            state: self.state.clone(),
            metro_type: self.metro(),
            center,
            boundary: self.boundary().ok(),
        })
    }

    #[must_use]
    pub fn sibling(&self) -> SiblingTerritory {
        SiblingTerritory {
            id: self.clinic_id.clone(),
            name: self.display_name(),
            state: self.state.clone(),
            metro_type: self.metro(),
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// Load and validate clinic records from a JSON array file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or has
/// duplicate or empty clinic ids.
pub fn load_territories(path: &Path) -> Result<Vec<ClinicRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TerritoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let records = parse_territories(&content).map_err(|e| ConfigError::TerritoriesFileParse {
        path: path.display().to_string(),
        source: e,
    })?;

    validate_territories(&records)?;
    Ok(records)
}

pub(crate) fn parse_territories(content: &str) -> Result<Vec<ClinicRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

pub(crate) fn validate_territories(records: &[ClinicRecord]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for record in records {
        if record.clinic_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "clinic_id must be non-empty".to_string(),
            ));
        }
        if !seen.insert(record.clinic_id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate clinic_id: '{}'",
                record.clinic_id
            )));
        }
    }
    Ok(())
}

fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "clinic_id must be a string or number, got {other}"
        ))),
    }
}

fn coordinate_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[path = "territories_test.rs"]
mod tests;
