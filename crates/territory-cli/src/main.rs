mod export;
mod nearby;
mod simplify;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use territory_core::{AppConfig, ClinicRecord};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "territory-cli")]
#[command(about = "Clinic territory targeting export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the ad-targeting document for a clinic and write it to disk
    Export {
        /// Clinic id as it appears in the territory data file
        clinic_id: String,

        /// Seed the samplers for a reproducible document
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write into (defaults to `TERRITORY_OUTPUT_DIR`)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Place boundary exclusions on boundary vertices instead of sampling
        #[arg(long)]
        vertex_exclusions: bool,
    },
    /// List clinics close enough to compete with a clinic
    Nearby {
        /// Clinic id as it appears in the territory data file
        clinic_id: String,
    },
    /// Print a clinic's boundary simplified to about `target` vertices
    Simplify {
        /// Clinic id as it appears in the territory data file
        clinic_id: String,

        /// Desired vertex count
        #[arg(long, default_value_t = 100)]
        target: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` works even with a broken environment.
    let cli = Cli::parse();

    let config = territory_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        println!("territory-cli: run with --help to list commands");
        return Ok(());
    };
    run(command, &config).await
}

/// Loads the territory data file and dispatches one command.
async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let records = territory_core::load_territories(&config.data_path).with_context(|| {
        format!(
            "loading territory data from {}",
            config.data_path.display()
        )
    })?;
    tracing::debug!(clinics = records.len(), env = %config.env, "territory data loaded");

    match command {
        Commands::Export {
            clinic_id,
            seed,
            out,
            vertex_exclusions,
        } => {
            let options = export::ExportOptions {
                seed: seed.or(config.sample_seed),
                output_dir: out.unwrap_or_else(|| config.output_dir.clone()),
                vertex_exclusions,
            };
            let path = export::run_export(config, &records, &clinic_id, &options).await?;
            println!("{}", path.display());
        }
        Commands::Nearby { clinic_id } => {
            nearby::run_nearby(config, &records, &clinic_id)?;
        }
        Commands::Simplify { clinic_id, target } => {
            simplify::run_simplify(&records, &clinic_id, target)?;
        }
    }

    Ok(())
}

/// Looks up a clinic by id.
pub(crate) fn find_record<'a>(
    records: &'a [ClinicRecord],
    clinic_id: &str,
) -> anyhow::Result<&'a ClinicRecord> {
    records
        .iter()
        .find(|r| r.clinic_id == clinic_id)
        .ok_or_else(|| anyhow::anyhow!("clinic '{clinic_id}' not found in territory data"))
}

#[cfg(test)]
mod tests;
