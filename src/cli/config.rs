//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Notes directory
    pub dir: Option<PathBuf>,

    /// Journal directory; defaults to `journal/` under the notes directory
    pub journal_dir: Option<PathBuf>,

    /// Database file; defaults to `.loam/loam.db` under the notes directory
    pub db: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/loam/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("loam")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the journal directory relative to the notes directory.
    pub fn journal_dir(&self, notes_dir: &Path) -> PathBuf {
        self.journal_dir
            .clone()
            .unwrap_or_else(|| notes_dir.join("journal"))
    }

    /// Resolve the database path relative to the notes directory.
    pub fn db_path(&self, notes_dir: &Path) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| notes_dir.join(".loam").join("loam.db"))
    }
}
