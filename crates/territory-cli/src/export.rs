//! `export` command: build a targeting document and write it as JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use territory_core::{AppConfig, ClinicRecord, SiblingTerritory};
use territory_geo::SamplerConfig;
use territory_targeting::{
    export_file_name, generate_targeting, BoundaryStrategy, NoAddressResolver, TargetingConfig,
    TargetingDocument,
};

use crate::find_record;

#[derive(Debug, Clone)]
pub(crate) struct ExportOptions {
    pub(crate) seed: Option<u64>,
    pub(crate) output_dir: PathBuf,
    pub(crate) vertex_exclusions: bool,
}

pub(crate) fn targeting_config(config: &AppConfig, vertex_exclusions: bool) -> TargetingConfig {
    TargetingConfig {
        max_drive_minutes: config.max_drive_minutes,
        lookup_delay: Duration::from_millis(config.geocode_delay_ms),
        sampler: SamplerConfig {
            max_attempts: config.sample_attempts,
            target: config.sample_target,
            spacing_factor: config.spacing_factor,
        },
        boundary_strategy: if vertex_exclusions {
            BoundaryStrategy::Vertices
        } else {
            BoundaryStrategy::Sampled
        },
    }
}

/// Generates the document for `clinic_id` and writes it under
/// `options.output_dir`. Returns the written path.
///
/// No geocoding provider is wired in, so every address is its fallback
/// label.
pub(crate) async fn run_export(
    config: &AppConfig,
    records: &[ClinicRecord],
    clinic_id: &str,
    options: &ExportOptions,
) -> anyhow::Result<PathBuf> {
    let record = find_record(records, clinic_id)?;
    let territory = record
        .territory()
        .ok_or_else(|| anyhow::anyhow!("clinic '{clinic_id}' has no valid center coordinates"))?;
    if let Err(e) = record.boundary() {
        tracing::warn!(clinic_id, error = %e, "clinic boundary is unusable");
    }

    let siblings: Vec<SiblingTerritory> = records.iter().map(ClinicRecord::sibling).collect();
    let targeting = targeting_config(config, options.vertex_exclusions);
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let document = generate_targeting(
        &territory,
        &siblings,
        &NoAddressResolver,
        &targeting,
        &mut rng,
    )
    .await
    .with_context(|| format!("generating targeting for clinic '{clinic_id}'"))?;

    write_document(&options.output_dir, &document)
}

/// Writes `document` as pretty JSON to its export file name in `dir`.
pub(crate) fn write_document(dir: &Path, document: &TargetingDocument) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(export_file_name(&document.clinic_id, &document.clinic_name));
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        inclusions = document.summary.total_inclusions,
        exclusions = document.summary.total_exclusions,
        "targeting document written"
    );
    Ok(path)
}
