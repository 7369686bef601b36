//! Environment variable overrides for configuration.

use crate::errors::Error;

use super::Config;
use super::env_parser;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    env_parser::apply_database_path_override(&mut config.database_path)?;
    env_parser::apply_geocoder_url_override(&mut config.geocoder_url)?;
    env_parser::apply_geocoder_timeout_override(&mut config.geocoder_timeout_secs)?;
    env_parser::apply_log_level_override(&mut config.log_level)?;
    Ok(())
}
