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
    /// Uses `~/.config/wisdom-kiosk/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if no config directory is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("wisdom-kiosk").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`; the caller is expected
    /// to run `validate()` after applying CLI overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The content endpoint URL is present and well-formed
    /// - The interact endpoint URL, when present, is well-formed
    /// - Timer settings are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.content_url.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "A content endpoint URL must be configured \
                          (config file or --content-url)"
                    .to_string(),
            });
        }

        if reqwest::Url::parse(&self.remote.content_url).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid content URL '{}'", self.remote.content_url),
            });
        }

        if let Some(interact_url) = &self.remote.interact_url {
            if reqwest::Url::parse(interact_url).is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("Invalid interact URL '{}'", interact_url),
                });
            }
        }

        if self.kiosk.idle_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "idle_timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.kiosk.spin_tick_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "spin_tick_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
