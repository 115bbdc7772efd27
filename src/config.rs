//! # Configuration Management
//!
//! Loads the observer location and output preferences from
//! `moon-config.toml`. A missing or malformed file falls back to the default
//! configuration (an observer at Greenwich) so the tool always produces an
//! ephemeris.

use crate::Observer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Errors from reading, writing or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML for [`Config`]
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("latitude {0}° is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0}° is outside [-180, 180]")]
    Longitude(f64),
}

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Observer location
    pub observer: ObserverConfig,
    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Observer location as written in the config file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Human-readable site name for reference
    pub name: String,
    /// Latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, west positive (Philadelphia is +75.2)
    pub longitude: f64,
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Print the result as JSON instead of the text report
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig {
                name: "Greenwich".to_string(),
                latitude: 51.4769,
                longitude: 0.0,
            },
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                log::info!("Loaded configuration for observer: {}", config.observer.name);
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config file found, using default configuration (Greenwich)");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default configuration (Greenwich)");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting any failure.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.observer()?;
        Ok(config)
    }

    /// Save configuration as pretty TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validated observer for the ephemeris
    pub fn observer(&self) -> Result<Observer, ConfigError> {
        Observer::new(self.observer.latitude, self.observer.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observer.name, "Greenwich");
        assert_eq!(config.observer.latitude, 51.4769);
        assert_eq!(config.observer.longitude, 0.0);
        assert!(!config.output.json);
        assert!(config.observer().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.observer.name = "Philadelphia".to_string();
        config.observer.latitude = 39.95;
        config.observer.longitude = 75.17;
        config.output.json = true;

        config.save_to_path(file.path()).unwrap();
        let loaded = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_output_section_is_optional() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[observer]\nname = \"Quito\"\nlatitude = -0.18\nlongitude = 78.47\n",
        )
        .unwrap();
        let config = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(config.observer.name, "Quito");
        assert!(!config.output.json);
    }

    #[test]
    fn test_out_of_range_observer_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[observer]\nname = \"Nowhere\"\nlatitude = 95.0\nlongitude = 0.0\n",
        )
        .unwrap();
        assert!(matches!(
            Config::try_load_from_path(file.path()),
            Err(ConfigError::Latitude(_))
        ));
        // The lenient loader falls back instead
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "observer = [not toml").unwrap();
        assert!(matches!(
            Config::try_load_from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_misspelled_key_is_reported_and_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[observer]\nname = \"Philadelphia\"\nlatitude = 39.95\nlongitud = 75.17\n",
        )
        .unwrap();
        let err = Config::try_load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("longitude"), "{err}");
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config, Config::default());
    }
}
