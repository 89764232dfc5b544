//! Configuration for the vocabulary engine.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::VocabularyStore;

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the vocabulary document lives.
    #[serde(default = "VocabularyStore::default_path")]
    pub data_file: PathBuf,

    /// Fixed UTC offset (`+01:00`) that defines calendar days.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Default horizon for upcoming reviews.
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_utc_offset() -> String {
    "+01:00".to_string()
}

fn default_days_ahead() -> u32 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: VocabularyStore::default_path(),
            utc_offset: default_utc_offset(),
            days_ahead: default_days_ahead(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-srs")
            .join("config.toml")
    }

    /// Load config from `path`, returning defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.zone()?;
        Ok(config)
    }

    /// Save config to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// The civil zone all day boundaries are computed in.
    pub fn zone(&self) -> Result<FixedOffset> {
        self.utc_offset
            .parse::<FixedOffset>()
            .map_err(|e| anyhow::anyhow!("Invalid utc_offset {:?}: {}", self.utc_offset, e))
    }
}
