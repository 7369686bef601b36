//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.trim().to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as an unsigned integer.
fn parse_env_u64(name: &str, value: &str) -> Result<u64, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

pub const DATABASE_PATH: &str = "NAV2CONTACTS_DATABASE_PATH";
pub const GEOCODER_URL: &str = "NAV2CONTACTS_GEOCODER_URL";
pub const GEOCODER_TIMEOUT_SECS: &str = "NAV2CONTACTS_GEOCODER_TIMEOUT_SECS";
pub const LOG_LEVEL: &str = "NAV2CONTACTS_LOG_LEVEL";

/// Apply NAV2CONTACTS_DATABASE_PATH environment variable override.
pub fn apply_database_path_override(database_path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var(DATABASE_PATH) {
        *database_path = parse_env_path(DATABASE_PATH, &val)?;
    }
    Ok(())
}

/// Apply NAV2CONTACTS_GEOCODER_URL environment variable override.
pub fn apply_geocoder_url_override(geocoder_url: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var(GEOCODER_URL) {
        *geocoder_url = parse_env_string(GEOCODER_URL, &val)?;
    }
    Ok(())
}

/// Apply NAV2CONTACTS_GEOCODER_TIMEOUT_SECS environment variable override.
pub fn apply_geocoder_timeout_override(timeout_secs: &mut u64) -> Result<(), Error> {
    if let Ok(val) = std::env::var(GEOCODER_TIMEOUT_SECS) {
        *timeout_secs = parse_env_u64(GEOCODER_TIMEOUT_SECS, &val)?;
    }
    Ok(())
}

/// Apply NAV2CONTACTS_LOG_LEVEL environment variable override.
pub fn apply_log_level_override(log_level: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var(LOG_LEVEL) {
        *log_level = parse_env_string(LOG_LEVEL, &val)?;
    }
    Ok(())
}
