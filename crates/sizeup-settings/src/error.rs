//! Error types for reading and writing the preferences file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parent directory of the preferences file could not be created
    #[error("Cannot create config directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON preferences: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML preferences: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot encode preferences as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems with the content or location of the configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Config files end in .json or .toml, got '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: String, value: String },

    /// No per-user config directory is known on this OS
    #[error("No config directory on {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
