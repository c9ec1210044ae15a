//! # Configuration Management
//!
//! Settings for the binary, read from an optional `tide-config.toml`: the
//! station to predict for, an external station table, and the day chart
//! sampling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tide-config.toml";

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Station selection
    pub station: StationConfig,
    /// Station table source
    pub catalog: CatalogConfig,
    /// Day chart options
    pub display: DisplayConfig,
}

/// Station to predict for
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StationConfig {
    /// Catalog key, e.g. "BREST"; the catalog default is used when absent
    pub name: Option<String>,
}

/// Where the station table is read from
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV table on disk; the bundled table is used when absent
    pub path: Option<PathBuf>,
    /// Overrides the catalog's default station
    pub default_station: Option<String>,
}

/// Day chart options
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minutes between plotted samples (1 to 1440)
    pub step_minutes: u16,
    /// Chart height in text rows
    pub rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            step_minutes: 30,
            rows: 20,
        }
    }
}

impl Config {
    /// Read [`CONFIG_FILE`] from the working directory.
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Read settings from `path`.
    ///
    /// A missing or unparsable file is logged and yields [`Config::default`];
    /// keys absent from a valid file keep their default values.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), station = ?config.station.name, "configuration loaded");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Sampling step of the day chart, clamped to one minute .. one day
    pub fn step_minutes(&self) -> u16 {
        self.display.step_minutes.clamp(1, 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.station.name, None);
        assert_eq!(config.catalog.path, None);
        assert_eq!(config.catalog.default_station, None);
        assert_eq!(config.display.step_minutes, 30);
        assert_eq!(config.display.rows, 20);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.station.name = Some("CONCARNEAU".to_string());
        config.catalog.path = Some(PathBuf::from("/srv/tides/stations.csv"));
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.station.name.as_deref(), Some("CONCARNEAU"));
        assert_eq!(parsed.catalog.path, config.catalog.path);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[station]\nname = \"SAINT-MALO\"").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.station.name.as_deref(), Some("SAINT-MALO"));
        assert_eq!(config.display.step_minutes, 30);
        assert_eq!(config.catalog.default_station, None);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[station\nname = ").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.station.name, None);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // No file: bundled table, catalog default station
        assert_eq!(config.station.name, None);
        assert_eq!(config.display.rows, 20);
    }

    #[test]
    fn test_step_is_clamped() {
        let mut config = Config::default();
        config.display.step_minutes = 0;
        assert_eq!(config.step_minutes(), 1);
        config.display.step_minutes = 5000;
        assert_eq!(config.step_minutes(), 1440);
    }
}
