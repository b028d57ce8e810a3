#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::store::{DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::domain::model::Quantity;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_LOG_FILE: &str = "inventory.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Values given explicitly on the command line. They win over the TOML file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub data_file: Option<String>,
    pub log_file: Option<String>,
    pub low_stock_threshold: Option<Quantity>,
    pub verbose: bool,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: String,
    pub log_file: String,
    pub log_level: String,
    pub low_stock_threshold: Quantity,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            verbose: false,
        }
    }
}

impl Settings {
    /// Command line, then TOML, then built-in defaults.
    pub fn resolve(overrides: SettingsOverrides, file: &TomlConfig) -> Self {
        let defaults = Settings::default();
        Self {
            data_file: overrides
                .data_file
                .or_else(|| file.storage.data_file.clone())
                .unwrap_or(defaults.data_file),
            log_file: overrides
                .log_file
                .or_else(|| file.logging.log_file.clone())
                .unwrap_or(defaults.log_file),
            log_level: file
                .logging
                .level
                .clone()
                .map(|level| level.to_ascii_lowercase())
                .unwrap_or(defaults.log_level),
            low_stock_threshold: overrides
                .low_stock_threshold
                .or(file.stock.low_stock_threshold)
                .unwrap_or(defaults.low_stock_threshold),
            verbose: overrides.verbose,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_file", &self.data_file)?;
        validate_path("logging.log_file", &self.log_file)?;
        validate_one_of("logging.level", &self.log_level, LOG_LEVELS)?;

        if !self.low_stock_threshold.is_finite() {
            return Err(InventoryError::InvalidConfigValueError {
                field: "stock.low_stock_threshold".to_string(),
                value: self.low_stock_threshold.to_string(),
                reason: "Threshold must be a finite number".to_string(),
            });
        }

        Ok(())
    }
}
