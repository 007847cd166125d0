//! Run configuration
//!
//! Velocity thresholds and file locations, loaded from an optional TOML file.
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! [velocity_limit]
//! max_daily_load_amount = 5000
//! max_daily_transaction_count = 3
//! max_weekly_load_amount = 20000
//!
//! [files]
//! input_file = "input.txt"
//! output_file = "output.txt"
//! ```

use crate::types::VelocityError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The three velocity thresholds applied to every customer
///
/// Read-only for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VelocityLimits {
    /// Maximum total amount loaded per UTC calendar day
    pub max_daily_load_amount: Decimal,
    /// Maximum number of accepted loads per UTC calendar day
    pub max_daily_transaction_count: u32,
    /// Maximum total amount loaded per UTC week (Monday to Sunday)
    pub max_weekly_load_amount: Decimal,
}

impl Default for VelocityLimits {
    fn default() -> Self {
        Self {
            max_daily_load_amount: Decimal::new(5000, 0),
            max_daily_transaction_count: 3,
            max_weekly_load_amount: Decimal::new(20000, 0),
        }
    }
}

impl VelocityLimits {
    /// Create a new set of thresholds
    pub fn new(
        max_daily_load_amount: Decimal,
        max_daily_transaction_count: u32,
        max_weekly_load_amount: Decimal,
    ) -> Self {
        Self {
            max_daily_load_amount,
            max_daily_transaction_count,
            max_weekly_load_amount,
        }
    }

    /// Check that no amount threshold is negative
    pub fn validate(&self) -> Result<(), VelocityError> {
        if self.max_daily_load_amount.is_sign_negative() {
            return Err(VelocityError::invalid_config(format!(
                "max_daily_load_amount must not be negative, got {}",
                self.max_daily_load_amount
            )));
        }
        if self.max_weekly_load_amount.is_sign_negative() {
            return Err(VelocityError::invalid_config(format!(
                "max_weekly_load_amount must not be negative, got {}",
                self.max_weekly_load_amount
            )));
        }
        Ok(())
    }
}

/// Input and output locations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// Top-level configuration file model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub velocity_limit: VelocityLimits,
    pub files: FileConfig,
}

impl Config {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML,
    /// contains unknown keys, or carries negative thresholds.
    pub fn load(path: &Path) -> Result<Self, VelocityError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| VelocityError::open_failed(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, VelocityError> {
        let config: Config = toml::from_str(content)?;
        config.velocity_limit.validate()?;
        Ok(config)
    }
}
