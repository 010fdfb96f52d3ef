use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::AssessError;
use crate::tables::Tables;

pub const CONFIG_ENV: &str = "RWH_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "rwh.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    pub samples: usize, // Synthetic training rows
    pub seed: u64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            samples: 100,
            seed: 42,
        }
    }
}

// Service settings; every field has a default so the file is optional
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub tables_path: Option<PathBuf>, // Falls back to the built-in tables
    pub estimator: EstimatorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: "127.0.0.1:8000".to_string(),
            tables_path: None,
            estimator: EstimatorSettings::default(),
        }
    }
}

impl Settings {
    /// Reads the file named by `RWH_CONFIG`, else `rwh.toml` in the working
    /// directory. A missing default file means default settings; a missing
    /// file that was asked for explicitly is an error.
    pub fn load() -> Result<Self, AssessError> {
        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(Path::new(&path)),
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_path(Path::new(DEFAULT_CONFIG_FILE))
            }
            Err(_) => Ok(Settings::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AssessError> {
        let toml_str = fs::read_to_string(path)
            .map_err(|e| AssessError::Config(format!("failed to read {}: {e}", path.display())))?;
        let settings = Self::from_toml_str(&toml_str)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, AssessError> {
        toml::from_str(toml_str)
            .map_err(|e| AssessError::Config(format!("failed to parse settings: {e}")))
    }

    pub fn tables(&self) -> Result<Tables, AssessError> {
        match &self.tables_path {
            Some(path) => Tables::from_path(path),
            None => Tables::builtin(),
        }
    }
}
