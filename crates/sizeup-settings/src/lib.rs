//! SizeUp Settings Crate
//!
//! Handles display and export preferences and their persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, ExportSettings, Preferences};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use manager::SettingsManager;
