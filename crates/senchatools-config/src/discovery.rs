//! File-based settings discovery for CLI use.
//!
//! Finds `senchatools.toml` and layers it with defaults and the environment.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment, Provider,
};

use crate::error::{ConfigError, Result};
use crate::settings::Settings;

/// Settings file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "senchatools.toml";

/// Prefix for environment overrides; nested keys use `__`
/// (`SENCHATOOLS_WATCH__INCLUDE`).
pub const ENV_PREFIX: &str = "SENCHATOOLS_";

/// Settings discovery rooted at a project directory.
///
/// # Example
///
/// ```no_run
/// use senchatools_config::ConfigDiscovery;
///
/// let settings = ConfigDiscovery::new(".").load().unwrap();
/// println!("{}", settings.url_pattern);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    file: Option<PathBuf>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file: None,
        }
    }

    /// Use an explicit settings file instead of searching the root.
    pub fn with_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Locate the settings file, if any.
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(file) = &self.file {
            return Some(file.clone());
        }

        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Directory relative settings paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.file
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone())
    }

    /// Build the layered figment: defaults, file, environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when an explicit file does not exist.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        if let Some(path) = self.find() {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            tracing::debug!("Loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load, resolve and validate settings.
    pub fn load(&self) -> Result<Settings> {
        self.load_with(Figment::new())
    }

    /// Like [`load`](Self::load), with `overrides` merged last.
    pub fn load_with(&self, overrides: impl Provider) -> Result<Settings> {
        let settings: Settings = self.figment()?.merge(overrides).extract()?;
        let settings = settings.resolve_paths(&self.base_dir());
        settings.validate()?;
        Ok(settings)
    }
}
