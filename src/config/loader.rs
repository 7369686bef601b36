//! Configuration file loading and parsing.

use crate::errors::Error;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: PathBuf,

    #[serde(default)]
    pub geocoder_url: String,

    #[serde(default)]
    pub geocoder_timeout_secs: Option<u64>,

    #[serde(default)]
    pub log_level: String,
}

/// Location of the config file: `<config_dir>/nav2contacts/config.toml`.
pub fn config_file_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config_dir.join("nav2contacts/config.toml")
}

/// Load configuration from TOML file.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    let config_path = config_file_path();

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.database_path.as_os_str().is_empty());
        assert!(config.geocoder_url.is_empty());
        assert_eq!(config.geocoder_timeout_secs, None);
        assert!(config.log_level.is_empty());
    }

    #[test]
    fn test_config_file_full() {
        let content = r#"
            database_path = "/data/contacts.db"
            geocoder_url = "http://localhost:8080"
            geocoder_timeout_secs = 30
            log_level = "debug"
        "#;

        let config: ConfigFile = toml::from_str(content).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/data/contacts.db"));
        assert_eq!(config.geocoder_url, "http://localhost:8080");
        assert_eq!(config.geocoder_timeout_secs, Some(30));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_file_path_location() {
        assert!(config_file_path().ends_with("nav2contacts/config.toml"));
    }
}
