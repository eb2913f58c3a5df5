use std::path::PathBuf;

use tempfile::tempdir;
use territory_core::{ClinicRecord, Environment};

use super::*;

fn app_config(output_dir: PathBuf) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        data_path: PathBuf::from("./data/territories.json"),
        output_dir,
        geocode_delay_ms: 0,
        max_drive_minutes: 40.0,
        sample_attempts: 1000,
        sample_target: 10,
        spacing_factor: 0.15,
        sample_seed: None,
    }
}

fn records_json() -> serde_json::Value {
    serde_json::json!([
        {
            "clinic_id": 100,
            "clinic_name": "Macon  Central",
            "state": "GA",
            "latitude": 33.5,
            "longitude": -83.5,
            "metro_type": "urban",
            "raw_geojson": {
                "type": "Polygon",
                "coordinates": [[
                    [-83.6, 33.4], [-83.4, 33.4], [-83.4, 33.6], [-83.6, 33.6], [-83.6, 33.4]
                ]]
            }
        },
        {
            "clinic_id": "200",
            "clinic_name": "Riverside",
            "state": "GA",
            "latitude": "33.55",
            "longitude": "-83.5"
        },
        {
            "clinic_id": "300",
            "clinic_name": "No Shape",
            "latitude": 32.0,
            "longitude": -81.0
        }
    ])
}

fn records() -> Vec<ClinicRecord> {
    serde_json::from_value(records_json()).unwrap()
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["territory-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_export_with_flags() {
    let cli = Cli::try_parse_from([
        "territory-cli",
        "export",
        "100",
        "--seed",
        "7",
        "--out",
        "/tmp/out",
        "--vertex-exclusions",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Export {
        clinic_id,
        seed,
        out,
        vertex_exclusions,
    }) = cli.command
    else {
        panic!("expected export command");
    };
    assert_eq!(clinic_id, "100");
    assert_eq!(seed, Some(7));
    assert_eq!(out, Some(PathBuf::from("/tmp/out")));
    assert!(vertex_exclusions);
}

#[test]
fn parses_export_defaults() {
    let cli = Cli::try_parse_from(["territory-cli", "export", "100"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Export {
            seed: None,
            out: None,
            vertex_exclusions: false,
            ..
        })
    ));
}

#[test]
fn parses_simplify_target() {
    let cli = Cli::try_parse_from(["territory-cli", "simplify", "100", "--target", "25"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Simplify { target: 25, .. })
    ));

    let cli = Cli::try_parse_from(["territory-cli", "simplify", "100"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Simplify { target: 100, .. })
    ));
}

#[test]
fn parses_nearby() {
    let cli = Cli::try_parse_from(["territory-cli", "nearby", "200"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Nearby { ref clinic_id }) if clinic_id == "200"));
}

#[test]
fn help_parses_without_loading_config() {
    let err = Cli::try_parse_from(["territory-cli", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[tokio::test]
async fn run_reads_data_file_from_config() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("territories.json");
    std::fs::write(&data_path, records_json().to_string()).unwrap();

    let mut config = app_config(dir.path().join("out"));
    config.data_path = data_path;
    config.sample_seed = Some(3);

    let command = Commands::Export {
        clinic_id: "100".to_string(),
        seed: None,
        out: None,
        vertex_exclusions: false,
    };
    run(command, &config).await.unwrap();

    assert!(dir
        .path()
        .join("out")
        .join("facebook_targeting_100_Macon_Central.json")
        .exists());
}

#[tokio::test]
async fn run_reports_missing_data_file() {
    let dir = tempdir().unwrap();
    let mut config = app_config(dir.path().to_path_buf());
    config.data_path = dir.path().join("missing.json");

    let err = run(
        Commands::Nearby {
            clinic_id: "100".to_string(),
        },
        &config,
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("loading territory data"));
}

#[test]
fn export_requires_clinic_id() {
    assert!(Cli::try_parse_from(["territory-cli", "export"]).is_err());
}

#[test]
fn find_record_reports_unknown_id() {
    let records = records();
    assert_eq!(find_record(&records, "200").unwrap().clinic_id, "200");
    let err = find_record(&records, "999").unwrap_err();
    assert!(err.to_string().contains("999"));
}

#[test]
fn targeting_config_follows_app_config() {
    let mut config = app_config(PathBuf::from("."));
    config.geocode_delay_ms = 250;
    config.sample_target = 4;
    let targeting = export::targeting_config(&config, true);
    assert_eq!(targeting.lookup_delay, std::time::Duration::from_millis(250));
    assert_eq!(targeting.sampler.target, 4);
    assert_eq!(
        targeting.boundary_strategy,
        territory_targeting::BoundaryStrategy::Vertices
    );
}

#[tokio::test]
async fn export_writes_named_document() {
    let dir = tempdir().unwrap();
    let config = app_config(dir.path().to_path_buf());
    let options = export::ExportOptions {
        seed: Some(42),
        output_dir: dir.path().join("exports"),
        vertex_exclusions: false,
    };

    let path = export::run_export(&config, &records(), "100", &options)
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "facebook_targeting_100_Macon_Central.json"
    );
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["clinic_id"], "100");
    assert_eq!(written["summary"]["competing_clinics_excluded"], 1);
    let competitor = &written["excluded_geo_locations"]["custom_locations"][0];
    assert_eq!(competitor["name"], "Competing Clinic: Riverside");
    assert_eq!(competitor["address"], "Riverside, GA");
}

#[tokio::test]
async fn export_without_boundary_fails() {
    let dir = tempdir().unwrap();
    let config = app_config(dir.path().to_path_buf());
    let options = export::ExportOptions {
        seed: Some(1),
        output_dir: dir.path().to_path_buf(),
        vertex_exclusions: false,
    };

    let err = export::run_export(&config, &records(), "300", &options)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("no boundary geometry for territory 300"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
