//! User configuration (`<config dir>/tagwrangler/config.toml`).

use crate::analyzer::{DEFAULT_CO_OCCURRENCE_MIN, DEFAULT_ORPHAN_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::{Result, TagError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI defaults. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault used when `--vault` is not given.
    pub vault: Option<PathBuf>,
    pub similarity_threshold: f64,
    pub orphan_threshold: usize,
    pub co_occurrence_min_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            orphan_threshold: DEFAULT_ORPHAN_THRESHOLD,
            co_occurrence_min_count: DEFAULT_CO_OCCURRENCE_MIN,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tagwrangler").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.similarity_threshold) {
            return Err(TagError::Config(format!(
                "similarity_threshold must be between 0 and 100, got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }

    /// Pick the vault: the CLI flag wins, then the configured default.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        cli_vault
            .map(Path::to_path_buf)
            .or_else(|| self.vault.clone())
            .ok_or_else(|| {
                TagError::Config("no vault given; pass --vault or set `vault` in config.toml".to_string())
            })
    }
}
