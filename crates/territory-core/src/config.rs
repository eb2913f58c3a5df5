use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_non_negative_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(var, "must be a finite, non-negative number".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("TERRITORY_ENV", "development"))?;
    let log_level = or_default("TERRITORY_LOG_LEVEL", "info");
    let data_path = PathBuf::from(or_default(
        "TERRITORY_DATA_PATH",
        "./data/territories.json",
    ));
    let output_dir = PathBuf::from(or_default("TERRITORY_OUTPUT_DIR", "."));

    let geocode_delay_ms = parse_u64("TERRITORY_GEOCODE_DELAY_MS", "100")?;
    let max_drive_minutes = parse_non_negative_f64("TERRITORY_MAX_DRIVE_MINUTES", "40")?;
    let sample_attempts = parse_positive_usize("TERRITORY_SAMPLE_ATTEMPTS", "1000")?;
    let sample_target = parse_positive_usize("TERRITORY_SAMPLE_TARGET", "10")?;
    let spacing_factor = parse_non_negative_f64("TERRITORY_SPACING_FACTOR", "0.15")?;

    let sample_seed = match lookup("TERRITORY_SAMPLE_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("TERRITORY_SAMPLE_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        data_path,
        output_dir,
        geocode_delay_ms,
        max_drive_minutes,
        sample_attempts,
        sample_target,
        spacing_factor,
        sample_seed,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TERRITORY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
