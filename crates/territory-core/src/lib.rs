pub mod app_config;
pub mod config;
pub mod geojson;
pub mod territories;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geojson::{extract_boundary, validate_ring, BoundaryError};
pub use territories::{load_territories, ClinicRecord};
pub use types::{GeoPoint, MetroType, SiblingTerritory, Territory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read territories file {path}: {source}")]
    TerritoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse territories file {path}: {source}")]
    TerritoriesFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("territories validation error: {0}")]
    Validation(String),
}
