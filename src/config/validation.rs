//! Configuration validation logic.

use crate::errors::Error;
use crate::logging::normalize_level;
use std::path::PathBuf;

/// Longest geocoding timeout accepted, in seconds.
pub const MAX_GEOCODER_TIMEOUT_SECS: u64 = 300;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite contact store.
    pub database_path: PathBuf,
    /// Base URL of the geocoding service.
    pub geocoder_url: String,
    /// Per-request geocoding timeout in seconds.
    pub geocoder_timeout_secs: u64,
    /// Log level name.
    pub log_level: String,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Database path is not empty
    /// - Geocoder URL is http(s)
    /// - Geocoder timeout is between 1 and 300 seconds
    /// - Log level is a known level name
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_database_path()?;
        self.validate_geocoder_url()?;
        self.validate_geocoder_timeout()?;
        self.validate_log_level()?;

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_geocoder_url(&self) -> Result<(), Error> {
        let url = self.geocoder_url.trim();
        if url.is_empty() {
            return Err(Error::Config("Geocoder URL cannot be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Invalid geocoder URL: {url} (must start with http:// or https://)"
            )));
        }

        Ok(())
    }

    fn validate_geocoder_timeout(&self) -> Result<(), Error> {
        if self.geocoder_timeout_secs == 0 || self.geocoder_timeout_secs > MAX_GEOCODER_TIMEOUT_SECS
        {
            return Err(Error::Config(format!(
                "Invalid geocoder timeout: {} (must be between 1 and {MAX_GEOCODER_TIMEOUT_SECS} seconds)",
                self.geocoder_timeout_secs
            )));
        }

        Ok(())
    }

    fn validate_log_level(&self) -> Result<(), Error> {
        if normalize_level(&self.log_level).is_none() {
            return Err(Error::Config(format!(
                "Invalid log level: {} (expected off, error, warn, info, debug or trace)",
                self.log_level
            )));
        }

        Ok(())
    }
}
