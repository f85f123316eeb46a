//! Module resolution: turning an installed module identifier into a directory.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use senchatools_config::Settings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The identifier does not map to an existing directory
    #[error("module \"{0}\" could not be resolved to a directory")]
    NotFound(String),

    /// The filesystem failed while inspecting a module
    #[error("failed to inspect module \"{module}\": {source}")]
    Io {
        module: String,
        #[source]
        source: io::Error,
    },
}

/// Capability to list installed modules and locate them on disk.
pub trait ModuleResolver {
    /// Installed module identifiers, in declaration order.
    fn installed(&self) -> Vec<String>;

    /// Root directory of `module`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the module has no directory; `Io` for anything else.
    fn resolve(&self, module: &str) -> Result<PathBuf, ResolveError>;
}

/// Resolves dotted identifiers beneath a project root.
///
/// `shop.calendar` maps to `<root>/shop/calendar` unless the explicit
/// `modules` table names another directory for it.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
    installed: Vec<String>,
    overrides: BTreeMap<String, PathBuf>,
}

impl DirectoryResolver {
    pub fn new(root: impl AsRef<Path>, installed: Vec<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            installed,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, module: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        self.overrides
            .insert(module.into(), dir.as_ref().to_path_buf());
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            root: settings.project_root.clone(),
            installed: settings.installed_apps.clone(),
            overrides: settings.modules.clone(),
        }
    }

    fn candidate(&self, module: &str) -> PathBuf {
        match self.overrides.get(module) {
            Some(dir) => dir.clone(),
            None => module
                .split('.')
                .fold(self.root.clone(), |dir, part| dir.join(part)),
        }
    }
}

impl ModuleResolver for DirectoryResolver {
    fn installed(&self) -> Vec<String> {
        self.installed.clone()
    }

    fn resolve(&self, module: &str) -> Result<PathBuf, ResolveError> {
        if module.is_empty() || module.split('.').any(str::is_empty) {
            return Err(ResolveError::NotFound(module.to_string()));
        }

        let dir = self.candidate(module);
        match std::fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => Ok(dir),
            Ok(_) => Err(ResolveError::NotFound(module.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ResolveError::NotFound(module.to_string()))
            }
            Err(source) => Err(ResolveError::Io {
                module: module.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_dotted_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("shop/calendar")).unwrap();

        let resolver = DirectoryResolver::new(dir.path(), vec![]);
        assert_eq!(
            resolver.resolve("shop.calendar").unwrap(),
            dir.path().join("shop/calendar")
        );
    }

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("vendor/legacy")).unwrap();
        fs::create_dir_all(dir.path().join("legacy")).unwrap();

        let resolver = DirectoryResolver::new(dir.path(), vec![])
            .with_override("legacy", dir.path().join("vendor/legacy"));
        assert_eq!(
            resolver.resolve("legacy").unwrap(),
            dir.path().join("vendor/legacy")
        );
    }

    #[test]
    fn test_missing_module_is_not_found() {
        let dir = TempDir::new().unwrap();
        let resolver = DirectoryResolver::new(dir.path(), vec![]);
        assert!(matches!(
            resolver.resolve("nowhere"),
            Err(ResolveError::NotFound(m)) if m == "nowhere"
        ));
    }

    #[test]
    fn test_file_is_not_a_module() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("settings"), "").unwrap();
        let resolver = DirectoryResolver::new(dir.path(), vec![]);
        assert!(matches!(
            resolver.resolve("settings"),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_identifier_is_not_found() {
        let resolver = DirectoryResolver::new("/", vec![]);
        assert!(resolver.resolve("").is_err());
        assert!(resolver.resolve("shop..calendar").is_err());
    }

    #[test]
    fn test_installed_keeps_order() {
        let resolver =
            DirectoryResolver::new("/", vec!["b".to_string(), "a".to_string()]);
        assert_eq!(resolver.installed(), vec!["b".to_string(), "a".to_string()]);
    }
}
