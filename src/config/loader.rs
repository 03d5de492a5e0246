use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/folio/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("folio").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The counter has at least one step and a non-zero interval
    /// - The typing interval is non-zero
    /// - The theme storage key is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter.steps == 0 {
            return Err(ConfigError::ValidationError {
                message: "counter.steps must be at least 1".to_string(),
            });
        }

        if self.counter.interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "counter.interval_ms must be greater than 0".to_string(),
            });
        }

        if self.typing.char_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "typing.char_interval_ms must be greater than 0".to_string(),
            });
        }

        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "theme.storage_key must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
