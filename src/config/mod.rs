//! Configuration system for nav2contacts.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;

use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub use loader::ConfigFile;

/// Default geocoding endpoint (Nominatim-compatible).
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite contact store.
    #[serde(default)]
    pub database_path: PathBuf,

    /// Base URL of the geocoding service.
    #[serde(default)]
    pub geocoder_url: String,

    /// Per-request geocoding timeout in seconds.
    #[serde(default)]
    pub geocoder_timeout_secs: u64,

    /// Log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default)]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            database_path: home.join(".nav2contacts").join("contacts.db"),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_timeout_secs: 10,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        let file_config = loader::load_from_file()?;

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = file.database_path;
        }
        if !file.geocoder_url.is_empty() {
            self.geocoder_url = file.geocoder_url;
        }
        if let Some(timeout) = file.geocoder_timeout_secs {
            self.geocoder_timeout_secs = timeout;
        }
        if !file.log_level.is_empty() {
            self.log_level = file.log_level;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            database_path: self.database_path.clone(),
            geocoder_url: self.geocoder_url.clone(),
            geocoder_timeout_secs: self.geocoder_timeout_secs,
            log_level: self.log_level.clone(),
        };

        validator.validate()
    }

    pub fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoder_timeout_secs)
    }

    /// Ensure the parent directory of the database path exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
