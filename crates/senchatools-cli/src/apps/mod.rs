//! Discovery of buildable ExtJS apps among the installed modules.
//!
//! A module is an app when it contains `static/<name>/app/`, where `<name>`
//! is the last segment of its identifier. The app's output directory is
//! `static/<name>/` inside the module.

mod resolver;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use senchatools_config::{ConfigError, Settings};
use url::Url;

pub use resolver::{DirectoryResolver, ModuleResolver, ResolveError};

/// Identifier prefix of the host framework's own modules. These are never
/// apps and are not inspected.
pub const RESERVED_NAMESPACE: &str = "django.";

/// An app found by [`discover_apps`] or [`find_app`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredApp {
    pub name: String,
    pub output_dir: PathBuf,
}

impl DiscoveredApp {
    /// Attach the entry URL from the configured URL pattern.
    pub fn describe(&self, settings: &Settings) -> Result<AppDescriptor, ConfigError> {
        let raw = settings.app_url(&self.name);
        let entry_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
            field: "url_pattern".to_string(),
            value: raw.clone(),
            hint: format!("The expanded URL for {} is not valid ({e})", self.name),
        })?;
        Ok(AppDescriptor::new(
            self.name.clone(),
            self.output_dir.clone(),
            entry_url,
        ))
    }
}

/// Everything the build driver needs to know about one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    name: String,
    output_dir: PathBuf,
    entry_url: Url,
}

impl AppDescriptor {
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>, entry_url: Url) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
            entry_url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where `app.jsb3` and the built bundle are written.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// URL of the app's HTML entry point.
    pub fn entry_url(&self) -> &Url {
        &self.entry_url
    }
}

/// Whether `module` belongs to the host framework itself.
pub fn is_reserved(module: &str) -> bool {
    module.starts_with(RESERVED_NAMESPACE)
}

/// Find every installed module that looks like an app, in installation order.
///
/// Duplicate identifiers are inspected once, and app names are unique: a
/// later module whose app name is already taken is skipped with a warning.
/// Modules that cannot be resolved or do not have the app layout are skipped.
///
/// # Errors
///
/// Only unexpected resolver failures (`ResolveError::Io`) are returned.
pub fn discover_apps<R>(resolver: &R) -> Result<Vec<DiscoveredApp>, ResolveError>
where
    R: ModuleResolver + ?Sized,
{
    let installed = resolver.installed();
    let mut seen = HashSet::new();
    let mut names = HashSet::new();
    let mut apps = Vec::new();

    for module in &installed {
        if is_reserved(module) || !seen.insert(module.as_str()) {
            continue;
        }

        match inspect(resolver, module) {
            Ok(Some(app)) if names.contains(&app.name) => {
                tracing::warn!(
                    "Skipping {}: an app named {} was already found",
                    module,
                    app.name
                );
            }
            Ok(Some(app)) => {
                names.insert(app.name.clone());
                apps.push(app);
            }
            Ok(None) => {}
            Err(ResolveError::NotFound(_)) => {
                tracing::debug!("Skipping {}: module could not be resolved", module);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(apps)
}

/// Look up a single app by module identifier or by app name.
///
/// The query is first treated as a module identifier; if that does not
/// produce an app, the discovered apps are searched by name.
pub fn find_app<R>(resolver: &R, query: &str) -> Result<Option<DiscoveredApp>, ResolveError>
where
    R: ModuleResolver + ?Sized,
{
    if is_reserved(query) {
        return Ok(None);
    }

    match inspect(resolver, query) {
        Ok(Some(app)) => return Ok(Some(app)),
        Ok(None) | Err(ResolveError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }

    Ok(discover_apps(resolver)?
        .into_iter()
        .find(|app| app.name == query))
}

/// Apply the app layout test to one module.
fn inspect<R>(resolver: &R, module: &str) -> Result<Option<DiscoveredApp>, ResolveError>
where
    R: ModuleResolver + ?Sized,
{
    let dir = resolver.resolve(module)?;
    let name = module.rsplit('.').next().unwrap_or(module).to_string();
    let output_dir = dir.join("static").join(&name);
    let app_dir = output_dir.join("app");

    match std::fs::metadata(&app_dir) {
        Ok(meta) if meta.is_dir() => {
            tracing::debug!("Found ExtJS app: {}", name);
            Ok(Some(DiscoveredApp { name, output_dir }))
        }
        Ok(_) => {
            tracing::debug!("{} is not an ExtJS app ({} is not a directory)", name, app_dir.display());
            Ok(None)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} is not an ExtJS app ({} does not exist)", name, app_dir.display());
            Ok(None)
        }
        Err(source) => Err(ResolveError::Io {
            module: module.to_string(),
            source,
        }),
    }
}
