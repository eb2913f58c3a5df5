//! The targeting document handed to the ad platform.
//!
//! Field names are part of the export format and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use territory_core::GeoPoint;

pub const DISTANCE_UNIT: &str = "mile";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingDocument {
    pub clinic_id: String,
    pub clinic_name: String,
    /// RFC 3339, UTC, millisecond precision (`2026-01-02T03:04:05.678Z`).
    #[serde(with = "rfc3339_millis")]
    pub generated_at: DateTime<Utc>,
    pub geo_locations: LocationSet,
    pub excluded_geo_locations: LocationSet,
    pub territory_info: TerritoryInfo,
    pub summary: TargetingSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSet {
    pub custom_locations: Vec<CustomLocation>,
}

/// One inclusion or exclusion circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomLocation {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Miles; always positive.
    pub radius: u32,
    pub distance_unit: String,
    /// Competitor exclusions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    /// Competitor exclusions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_drive_time_min: Option<u32>,
}

impl CustomLocation {
    #[must_use]
    pub fn new(name: String, address: String, point: GeoPoint, radius: u32) -> Self {
        Self {
            name,
            address,
            latitude: point.lat,
            longitude: point.lng,
            radius,
            distance_unit: DISTANCE_UNIT.to_string(),
            distance_miles: None,
            estimated_drive_time_min: None,
        }
    }

    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Territory size metrics, distances rounded to 0.1 mile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryInfo {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub territory_width_miles: f64,
    pub territory_height_miles: f64,
    pub territory_size_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingSummary {
    pub total_inclusions: usize,
    pub total_exclusions: usize,
    pub competing_clinics_excluded: usize,
    pub boundary_exclusions: usize,
    /// Sorted, distinct.
    pub inclusion_radii_used: Vec<u32>,
    /// Sorted, distinct.
    pub exclusion_radii_used: Vec<u32>,
    pub coverage_strategy: String,
}

mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(d)
    }
}

/// Sorted distinct radii across `locations`.
#[must_use]
pub fn distinct_radii(locations: &[CustomLocation]) -> Vec<u32> {
    let mut radii: Vec<u32> = locations.iter().map(|l| l.radius).collect();
    radii.sort_unstable();
    radii.dedup();
    radii
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// File name for an exported document:
/// `facebook_targeting_<id>_<name>.json` with whitespace runs in the name
/// collapsed to `_`.
#[must_use]
pub fn export_file_name(clinic_id: &str, clinic_name: &str) -> String {
    let name = clinic_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("facebook_targeting_{clinic_id}_{name}.json")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn location(radius: u32) -> CustomLocation {
        CustomLocation::new(
            "Inclusion 1".to_string(),
            "Address not found".to_string(),
            GeoPoint::new(33.5, -83.5),
            radius,
        )
    }

    #[test]
    fn non_competitor_omits_metadata_fields() {
        let json = serde_json::to_value(location(3)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["distance_unit"], "mile");
        assert_eq!(obj["radius"], 3);
        assert!(!obj.contains_key("distance_miles"));
        assert!(!obj.contains_key("estimated_drive_time_min"));
    }

    #[test]
    fn competitor_includes_metadata_fields() {
        let mut loc = location(5);
        loc.distance_miles = Some(4.9);
        loc.estimated_drive_time_min = Some(12);
        let json = serde_json::to_value(loc).unwrap();
        assert_eq!(json["distance_miles"], 4.9);
        assert_eq!(json["estimated_drive_time_min"], 12);
    }

    fn document(generated_at: DateTime<Utc>) -> TargetingDocument {
        TargetingDocument {
            clinic_id: "42".to_string(),
            clinic_name: "Macon".to_string(),
            generated_at,
            geo_locations: LocationSet::default(),
            excluded_geo_locations: LocationSet::default(),
            territory_info: TerritoryInfo {
                center_latitude: 33.5,
                center_longitude: -83.5,
                territory_width_miles: 11.5,
                territory_height_miles: 13.8,
                territory_size_miles: 13.8,
            },
            summary: TargetingSummary {
                total_inclusions: 0,
                total_exclusions: 0,
                competing_clinics_excluded: 0,
                boundary_exclusions: 0,
                inclusion_radii_used: Vec::new(),
                exclusion_radii_used: Vec::new(),
                coverage_strategy: "Dense (small territory)".to_string(),
            },
        }
    }

    #[test]
    fn generated_at_uses_millisecond_precision() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
            + Duration::nanoseconds(678_901_234);
        let json = serde_json::to_value(document(at)).unwrap();
        assert_eq!(json["generated_at"], "2026-01-02T03:04:05.678Z");

        let back: TargetingDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back.generated_at, at - Duration::nanoseconds(901_234));
    }

    #[test]
    fn whole_second_timestamp_keeps_millis() {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(document(at)).unwrap();
        assert_eq!(json["generated_at"], "2026-06-01T00:00:00.000Z");
    }

    #[test]
    fn distinct_radii_sorted_and_deduplicated() {
        let locs: Vec<_> = [5, 1, 3, 1, 5].into_iter().map(location).collect();
        assert_eq!(distinct_radii(&locs), vec![1, 3, 5]);
        assert!(distinct_radii(&[]).is_empty());
    }

    #[test]
    fn round_tenth_keeps_one_decimal() {
        assert!((round_tenth(12.345) - 12.3).abs() < 1e-12);
        assert!((round_tenth(12.36) - 12.4).abs() < 1e-12);
        assert!(round_tenth(0.04).abs() < 1e-12);
    }

    #[test]
    fn export_file_name_collapses_whitespace() {
        assert_eq!(
            export_file_name("42", "Downtown  Atlanta\tClinic"),
            "facebook_targeting_42_Downtown_Atlanta_Clinic.json"
        );
        assert_eq!(
            export_file_name("7", "Macon"),
            "facebook_targeting_7_Macon.json"
        );
    }
}
