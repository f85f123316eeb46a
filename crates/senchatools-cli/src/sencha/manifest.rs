//! JSB3 manifest model and the rewrite applied to `sencha create jsb` output.
//!
//! `sencha create jsb` produces a manifest with two known problems:
//!
//! - every all-classes path is prefixed with `../static` instead of `/static`
//! - paths assume static files are served from `static/`, while the project
//!   may collect them somewhere else
//!
//! The app-all build also needs its output paths retargeted at the app's
//! output directory. The rewrite depends on the exact shape of the tool's
//! output, so that shape is validated first and any drift is a hard error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the first app-all file record.
pub const ALL_CLASSES_NAME: &str = "all-classes.js";
/// Name of the second app-all file record.
pub const APP_NAME: &str = "app.js";
/// Required target of the app-all build.
pub const APP_ALL_TARGET: &str = "app-all.js";

#[derive(Debug, Error)]
pub enum ManifestError {
    /// Not valid JSON
    #[error("Invalid manifest JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Valid JSON that does not have the structure sencha is known to emit
    #[error("Unexpected manifest structure: {0}")]
    Schema(String),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A JSB3 manifest.
///
/// Only the fields the rewrite touches are typed; everything else is carried
/// through untouched in the `extra` maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub builds: Vec<BuildEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    pub files: Vec<FileRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// Syntax errors are `Parse`; well-formed JSON of the wrong shape is
    /// `Schema`.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(raw).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => ManifestError::Schema(e.to_string()),
            _ => ManifestError::Parse(e),
        })
    }

    /// Serialize with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, ManifestError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(ManifestError::Serialize)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// The all-classes build: every source file the tool collected.
    pub fn all_classes(&self) -> Option<&BuildEntry> {
        self.builds.first()
    }

    /// The app-all build: the concatenated output targets.
    pub fn app_all(&self) -> Option<&BuildEntry> {
        self.builds.get(1)
    }

    /// Check the structural assumptions the rewrite depends on.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.builds.len() < 2 {
            return Err(ManifestError::Schema(format!(
                "expected an all-classes and an app-all build, found {} build(s)",
                self.builds.len()
            )));
        }

        let app_all = &self.builds[1];
        if app_all.files.len() != 2 {
            return Err(ManifestError::Schema(format!(
                "app-all build must list exactly 2 files, found {}",
                app_all.files.len()
            )));
        }

        for (record, expected) in app_all.files.iter().zip([ALL_CLASSES_NAME, APP_NAME]) {
            if record.name.as_deref() != Some(expected) {
                return Err(ManifestError::Schema(format!(
                    "app-all files must be named {ALL_CLASSES_NAME:?} then {APP_NAME:?}, found {:?}",
                    app_all
                        .files
                        .iter()
                        .map(|f| f.name.as_deref().unwrap_or(""))
                        .collect::<Vec<_>>()
                )));
            }
        }

        if app_all.target.as_deref() != Some(APP_ALL_TARGET) {
            return Err(ManifestError::Schema(format!(
                "app-all target must be {APP_ALL_TARGET:?}, found {:?}",
                app_all.target.as_deref().unwrap_or("")
            )));
        }

        Ok(())
    }
}

/// Rewrites raw `sencha create jsb` output for one app.
///
/// Pure: the same inputs always give the same output, and nothing is read
/// from or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestCleaner {
    static_root: String,
    output_path: String,
}

impl ManifestCleaner {
    /// # Arguments
    ///
    /// * `static_root` - Static root relative to the working directory,
    ///   `/`-separated
    /// * `output_path` - Output directory relative to the working directory,
    ///   `/`-separated and `/`-terminated
    pub fn new(static_root: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            static_root: static_root.into(),
            output_path: output_path.into(),
        }
    }

    pub fn static_root(&self) -> &str {
        &self.static_root
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Parse, validate, rewrite and re-serialize a manifest.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed JSON, `Schema` when the manifest does not have
    /// the shape described in [`Manifest::validate`].
    pub fn clean(&self, raw: &str) -> Result<String, ManifestError> {
        let mut manifest = Manifest::parse(raw)?;
        self.clean_manifest(&mut manifest)?;
        manifest.to_pretty_json()
    }

    /// Rewrite a parsed manifest in place.
    ///
    /// Validation runs before anything is touched, so on error the manifest
    /// is unchanged.
    pub fn clean_manifest(&self, manifest: &mut Manifest) -> Result<(), ManifestError> {
        manifest.validate()?;

        for record in &mut manifest.builds[0].files {
            record.path = clean_path(&record.path, &self.static_root);
        }

        for record in &mut manifest.builds[1].files {
            record.path.clone_from(&self.output_path);
        }

        Ok(())
    }
}

/// Fix one all-classes path.
///
/// A leading `../` loses its two dots, then every `/static` is replaced
/// with `static_root`.
pub fn clean_path(path: &str, static_root: &str) -> String {
    let path = if path.starts_with("../") { &path[2..] } else { path };
    path.replace("/static", static_root)
}
