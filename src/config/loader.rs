use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
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
    /// Uses `~/.config/biohub/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("biohub").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

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
    /// - The store URL is an absolute http(s) URL
    /// - Table names are not empty
    /// - Timeouts, when set, are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let store = &self.store;
        let url = Url::parse(&store.url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid store url '{}': {}", store.url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Store url must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }

        for (name, table) in [
            ("species_table", &store.species_table),
            ("profiles_table", &store.profiles_table),
        ] {
            if table.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must not be empty", name),
                });
            }
        }

        for (name, timeout) in [
            ("connect_timeout_seconds", store.connect_timeout_seconds),
            ("timeout_seconds", store.timeout_seconds),
        ] {
            if timeout == Some(0) {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be greater than 0", name),
                });
            }
        }

        Ok(())
    }
}
