use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    /// Pause between consecutive address lookups.
    pub geocode_delay_ms: u64,
    /// Competitors farther than this estimated drive are not excluded.
    pub max_drive_minutes: f64,
    pub sample_attempts: usize,
    pub sample_target: usize,
    /// Minimum inclusion spacing as a fraction of territory size.
    pub spacing_factor: f64,
    pub sample_seed: Option<u64>,
}
