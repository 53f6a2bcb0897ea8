//! Error types for configuration loading

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`crate::config::Settings`]
    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// TOML text supplied directly could not be parsed
    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON settings pushed by an editor could not be decoded
    #[error("Invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
}
