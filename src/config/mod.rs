//! Configuration management for dsa-sheet

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Catalog};
use crate::progress::{DEFAULT_STORAGE_KEY, FileBackend};
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Vim mode enabled
    #[serde(default = "default_vim_mode")]
    pub vim_mode: bool,

    /// Storage key for the completion record
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Sheet to load instead of the bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Where progress is stored, if not the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_vim_mode() -> bool {
    true
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            vim_mode: default_vim_mode(),
            storage_key: default_storage_key(),
            catalog_path: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "dsa-sheet")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the platform data directory path
    pub fn default_data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dsa-sheet").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the data directory, honoring the override
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Path of the TUI log file
    pub fn log_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("dsa-sheet.log"))
    }

    /// Storage backend rooted in the data directory
    pub fn backend(&self) -> Result<FileBackend> {
        Ok(FileBackend::new(self.data_dir()?))
    }

    /// Load the configured catalog, or the bundled one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => catalog::load_catalog(path)
                .with_context(|| format!("Failed to load catalog {:?}", path)),
            None => catalog::bundled().context("Bundled catalog is invalid"),
        }
    }

    /// Get the active theme: custom overrides first, then the named theme
    pub fn active_theme(&self) -> Theme {
        if let Some(theme) = &self.custom_theme {
            return theme.clone();
        }
        Theme::named(&self.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using Tokyo Night", self.theme);
            Theme::tokyo_night()
        })
    }
}
