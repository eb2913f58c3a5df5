use super::*;

const SAMPLE: &str = r#"[
  {
    "clinic_id": "101",
    "clinic_name": "Midtown",
    "state": "GA",
    "latitude": 33.78,
    "longitude": -84.38,
    "metro_type": "urban",
    "raw_geojson": "{\"type\":\"Polygon\",\"coordinates\":[[[-84.5,33.7],[-84.3,33.7],[-84.3,33.9],[-84.5,33.9],[-84.5,33.7]]]}"
  },
  {
    "clinic_id": 102,
    "state": "GA",
    "latitude": "33.95",
    "longitude": "-84.55",
    "raw_geojson": null
  },
  {
    "clinic_id": "103",
    "clinic_name": "Nowhere",
    "latitude": null,
    "longitude": "n/a",
    "metro_type": "rural"
  }
]"#;

#[test]
fn parses_mixed_id_and_coordinate_shapes() {
    let records = parse_territories(SAMPLE).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].clinic_id, "102");
    assert_eq!(records[1].latitude, Some(33.95));
    assert_eq!(records[1].longitude, Some(-84.55));
    assert_eq!(records[2].latitude, None);
    assert_eq!(records[2].longitude, None);
}

#[test]
fn display_name_falls_back_to_id() {
    let records = parse_territories(SAMPLE).unwrap();
    assert_eq!(records[0].display_name(), "Midtown");
    assert_eq!(records[1].display_name(), "Clinic 102");
}

#[test]
fn metro_defaults_to_unknown() {
    let records = parse_territories(SAMPLE).unwrap();
    assert_eq!(records[0].metro(), MetroType::Urban);
    assert_eq!(records[1].metro(), MetroType::Unknown);
    assert_eq!(records[2].metro(), MetroType::Rural);
}

#[test]
fn territory_carries_boundary_when_present() {
    let records = parse_territories(SAMPLE).unwrap();
    let territory = records[0].territory().unwrap();
    assert_eq!(territory.id, "101");
    assert_eq!(territory.center, GeoPoint::new(33.78, -84.38));
    assert_eq!(territory.boundary.as_ref().map(Vec::len), Some(5));

    let no_boundary = records[1].territory().unwrap();
    assert!(no_boundary.boundary.is_none());
}

#[test]
fn territory_requires_center() {
    let records = parse_territories(SAMPLE).unwrap();
    assert!(records[2].territory().is_none());
    // Still usable as a sibling; the targeting step skips it.
    let sibling = records[2].sibling();
    assert_eq!(sibling.name, "Nowhere");
    assert!(sibling.location().is_none());
}

#[test]
fn duplicate_ids_rejected() {
    let records = parse_territories(
        r#"[{"clinic_id": "1", "latitude": 1, "longitude": 1},
            {"clinic_id": 1, "latitude": 2, "longitude": 2}]"#,
    )
    .unwrap();
    let err = validate_territories(&records).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
        "expected duplicate validation error, got: {err:?}"
    );
}

#[test]
fn empty_id_rejected() {
    let records = parse_territories(r#"[{"clinic_id": "  "}]"#).unwrap();
    assert!(matches!(
        validate_territories(&records),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn boolean_id_is_a_parse_error() {
    assert!(parse_territories(r#"[{"clinic_id": true}]"#).is_err());
}

#[test]
fn load_territories_reports_missing_file() {
    let err = load_territories(Path::new("/nonexistent/territories.json")).unwrap_err();
    assert!(matches!(err, ConfigError::TerritoriesFileIo { .. }));
}
