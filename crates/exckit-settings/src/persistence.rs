//! Settings Persistence
//!
//! Handles loading and saving the editor configuration, falling back to
//! defaults when no configuration file exists yet.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "exckit";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Platform configuration file, e.g. `~/.config/exckit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the configuration at `path`, or defaults when it does not exist.
    ///
    /// An existing but unreadable or invalid file is an error; it is never
    /// silently replaced.
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            tracing::debug!("Loading settings from {}", path.display());
            Config::load_from_file(&path)?
        } else {
            tracing::info!(
                "No settings at {}, using defaults",
                path.display()
            );
            Config::default()
        };
        Ok(Self { config, path })
    }

    /// Writes the configuration back, creating parent directories.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        self.config.save_to_file(&self.path)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Replaces the configuration after validating it.
    pub fn replace(&mut self, config: Config) -> SettingsResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
