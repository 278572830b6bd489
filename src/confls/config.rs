use crate::error::{ConflsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";

/// Persisted CLI preferences, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Default `--format` for `ls` when none is given and `--quiet` is not set.
    #[serde(default)]
    pub configs_format: Option<String>,

    /// Path of the config snapshot to list from.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl CliConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            ConflsError::Config(format!("invalid {}: {e}", config_path.display()))
        })
    }

    /// The persisted default format, if one is set and non-empty.
    pub fn default_format(&self) -> Option<&str> {
        self.configs_format
            .as_deref()
            .filter(|f| !f.trim().is_empty())
    }
}
