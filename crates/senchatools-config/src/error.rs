//! Error types for settings loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested settings file does not exist
    #[error("Config file not found: {}\n\nHint: Create a senchatools.toml file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// figment could not merge or extract the layered sources
    #[error("Failed to load settings: {0}\n\nHint: Check senchatools.toml syntax and SENCHATOOLS_* variables")]
    Load(String),

    /// A setting that the current operation depends on is absent
    #[error("Missing required setting: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing setting
        field: String,
        /// How to provide it
        hint: String,
    },

    /// A setting is present but unusable
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the setting
        field: String,
        /// The rejected value
        value: String,
        /// What a valid value looks like
        hint: String,
    },

    /// The host project is not in build-ready (debug) mode
    #[error("debug_mode is false: the host project is not serving unbundled sources\n\nHint: Set debug_mode = true in senchatools.toml or pass --no-check-settings")]
    DebugModeDisabled,
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}
