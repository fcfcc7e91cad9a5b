//! Optional user configuration.
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! [general]
//! temp_folder = "temp"
//!
//! [output]
//! color = true
//! progress = true
//!
//! [logging]
//! level = "info"
//!
//! [count]
//! extensions = [".txt", ".log"]
//! ```
//!
//! Every section and key is optional. Nothing here changes how files are
//! sorted or how log lines are routed.

use crate::error::{HousekeepError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".housekeeprc.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousekeepConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub count: CountSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Folder, relative to the base directory, that receives a retired user's documents.
    #[serde(default = "default_temp_folder")]
    pub temp_folder: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_folder: default_temp_folder(),
        }
    }
}

fn default_temp_folder() -> String {
    "temp".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// A `tracing` filter directive such as `info` or `housekeep=debug`.
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSettings {
    /// Extensions counted when none are given on the command line.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl HousekeepConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.housekeeprc.toml` in the current directory
    /// 3. Look for `~/.config/housekeep/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if any file found cannot be parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("housekeep")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HousekeepError::not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| HousekeepError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| HousekeepError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
