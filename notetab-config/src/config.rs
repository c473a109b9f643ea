//! Core `Config` struct and its persistence.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Semantic validation of loaded values

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Editor configuration, stored as `~/.config/notetab/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Title for tabs created by "new" (and by the ensure-active policy)
    #[serde(default = "defaults::default_title")]
    pub default_title: String,

    /// File name pre-filled in the save dialog for never-saved tabs
    #[serde(default = "defaults::default_save_name")]
    pub default_save_name: String,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,

    /// Ask before closing a tab with unsaved changes
    #[serde(default = "defaults::confirm_close_dirty")]
    pub confirm_close_dirty: bool,

    /// Activate the existing tab when a file that is already open is picked again
    #[serde(default = "defaults::dedupe_open")]
    pub dedupe_open: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: defaults::default_title(),
            default_save_name: defaults::default_save_name(),
            log_level: LogLevel::default(),
            confirm_close_dirty: defaults::confirm_close_dirty(),
            dedupe_open: defaults::dedupe_open(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file is treated as "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        let written = fs::write(&temp_path, &yaml).and_then(|()| fs::rename(&temp_path, path));
        if let Err(source) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(io_err(source));
        }

        Ok(())
    }

    /// Check field values that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("default_title", &self.default_title),
            ("default_save_name", &self.default_save_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a bare file name, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Get the configuration file path: `~/.config/notetab/config.yaml`
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("notetab"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .map(|home| home.join(".config").join("notetab"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }
}
