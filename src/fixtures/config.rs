//! Fixture generation settings
//!
//! Settings come from built-in defaults, optionally overridden by a TOML file
//! and then by command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default values for fixture settings
mod defaults {
    use std::path::PathBuf;

    pub fn output_dir() -> PathBuf {
        "./files".into()
    }
    pub fn years() -> u32 {
        20
    }
    pub fn step_hours() -> u32 {
        3
    }
    pub fn seed() -> u64 {
        0x6e75_6d66_6978
    }
    pub fn write_float16_archive() -> bool {
        true
    }
}

/// Errors raised while loading fixture settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{key}': {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// What to generate and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Directory receiving every generated file
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Span of the weather series, in 365-day years
    #[serde(default = "defaults::years")]
    pub years: u32,

    /// Hours between two weather records
    #[serde(default = "defaults::step_hours")]
    pub step_hours: u32,

    /// Seed for the weather values
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Also write the archive holding the float16 array
    #[serde(default = "defaults::write_float16_archive")]
    pub write_float16_archive: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            years: defaults::years(),
            step_hours: defaults::step_hours(),
            seed: defaults::seed(),
            write_float16_archive: defaults::write_float16_archive(),
        }
    }
}

impl FixtureConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded fixture config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "step_hours".to_string(),
                value: self.step_hours.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Hours covered by the weather series (leap days ignored)
    pub fn total_hours(&self) -> u64 {
        self.years as u64 * 365 * 24
    }

    /// Number of weather records
    pub fn time_steps(&self) -> u64 {
        self.total_hours().div_ceil(self.step_hours.max(1) as u64)
    }
}
