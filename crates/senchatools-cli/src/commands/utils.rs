//! Shared utilities for command implementations.

use std::path::{Path, PathBuf};

use figment::providers::Serialized;
use senchatools_config::{ConfigDiscovery, Settings};

use crate::error::{Result, ResultExt};
use crate::sencha::paths::absolutize;

/// Directory commands run in and resolve relative arguments against.
pub fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Could not determine the working directory")
}

/// Load settings for a command.
///
/// # Arguments
///
/// * `work_dir` - Where `senchatools.toml` is looked up
/// * `config` - Explicit settings file (`--config`), relative to `work_dir`
/// * `url_pattern` - `--urlpattern`, merged over every other source
pub fn load_settings(work_dir: &Path, config: Option<&Path>, url_pattern: Option<&str>) -> Result<Settings> {
    let mut discovery = ConfigDiscovery::new(work_dir);
    if let Some(file) = config {
        discovery = discovery.with_file(absolutize(file, work_dir));
    }

    let settings = match url_pattern {
        Some(pattern) => discovery.load_with(Serialized::default("url_pattern", pattern))?,
        None => discovery.load()?,
    };

    tracing::debug!("Settings: {:?}", settings);
    Ok(settings)
}
