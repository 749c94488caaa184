//! Settings manager
//!
//! Locates the per-user configuration file and loads it, falling back to
//! defaults when it is missing or unreadable.

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "sizeup";

/// File name of the persisted configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Owns the active configuration and the file it came from
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// Platform configuration directory for SizeUp
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Path of the default configuration file
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Manager for an explicit file, loaded or defaulted
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = Self::load_or_default(&path);
        Self { config, path }
    }

    /// Manager for the per-user configuration file
    pub fn load() -> SettingsResult<Self> {
        Ok(Self::with_path(Self::config_file_path()?))
    }

    /// Load `path`, or return defaults when it is absent or invalid
    pub fn load_or_default(path: &Path) -> Config {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Config::default();
        }

        match Config::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the active configuration back to its file
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| SettingsError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        self.config.save_to_file(&self.path)?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
