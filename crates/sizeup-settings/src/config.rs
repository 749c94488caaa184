//! Configuration and settings management for SizeUp
//!
//! Only user preferences are persisted. The scene itself (comparator,
//! target, position, gap) is rebuilt from stock values on every launch.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Preferences (display unit, dimension line overlay)
//! - Export preferences (file name, output directory)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use sizeup_core::Unit;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used when exporting without further input
pub const DEFAULT_EXPORT_FILE: &str = "sizeup-comparison.png";

/// Display preferences applied on top of the stock scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display unit for labels and inputs
    pub unit: Unit,
    /// Draw dimension lines and labels
    pub show_dimension_lines: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            unit: Unit::Centimeters,
            show_dimension_lines: true,
        }
    }
}

/// Image export preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File name of the exported PNG
    pub file_name: String,
    /// Directory to write into; the picture or home directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE.to_string(),
            directory: None,
        }
    }
}

impl ExportSettings {
    /// Full path of the export target
    pub fn output_path(&self) -> PathBuf {
        let dir = self
            .directory
            .clone()
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(&self.file_name)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// The export file name must name a file
    pub fn validate(&self) -> SettingsResult<()> {
        let name = self.export.file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "export.file_name".to_string(),
                value: self.export.file_name.clone(),
            }
            .into());
        }
        Ok(())
    }
}
