use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable prefix, e.g. `UNIT_PRICE__DISPLAY__DECIMALS=3`
pub const ENV_PREFIX: &str = "UNIT_PRICE";

const MAX_DECIMALS: usize = 6;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places shown for unit prices
    pub decimals: usize,
    /// Suffix after a unit price, e.g. "25.00 per unit"
    pub unit_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            unit_label: "per unit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
    /// Log file for the interactive screen, which owns stdout
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: PathBuf::from("compare.log"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Load configuration from an optional file, then the environment
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), AppError> {
    if cfg.display.decimals > MAX_DECIMALS {
        return Err(AppError::ConfigError(format!(
            "display.decimals is {}, must be at most {}",
            cfg.display.decimals, MAX_DECIMALS
        )));
    }

    if cfg.display.unit_label.trim().is_empty() {
        return Err(AppError::ConfigError(
            "display.unit_label cannot be empty".to_string(),
        ));
    }

    let level = cfg.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(AppError::ConfigError(format!(
            "Invalid logging.level: '{}'. Must be one of: {}",
            cfg.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if cfg.logging.file.file_name().is_none() {
        return Err(AppError::ConfigError(format!(
            "logging.file must name a file: {}",
            cfg.logging.file.display()
        )));
    }

    Ok(())
}
