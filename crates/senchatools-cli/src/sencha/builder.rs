//! Per-app driver for the `sencha create jsb` / `sencha build` pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use senchatools_config::Settings;

use super::manifest::ManifestCleaner;
use super::paths::{absolutize, unix_dir, unix_relative};
use super::process::Tool;
use crate::apps::AppDescriptor;
use crate::error::BuildError;

/// File name of the persisted manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "app.jsb3";

/// Builds one app.
///
/// Every path the builder needs is computed at construction, so builders
/// for different apps share nothing and can be dropped independently.
#[derive(Debug, Clone)]
pub struct SenchaBuilder {
    app: AppDescriptor,
    tool: Tool,
    static_root: PathBuf,
    work_dir: PathBuf,
}

impl SenchaBuilder {
    /// # Arguments
    ///
    /// * `app` - The app to build
    /// * `settings` - Supplies the tool, its timeout and the static root
    /// * `work_dir` - Directory the tool runs in; manifest paths are written
    ///   relative to it
    pub fn new(app: AppDescriptor, settings: &Settings, work_dir: impl AsRef<Path>) -> Self {
        let work_dir = work_dir.as_ref().to_path_buf();
        let tool = Tool::new(
            settings.sencha_command.clone(),
            settings.tool_timeout_secs.map(Duration::from_secs),
        );

        Self {
            static_root: absolutize(&settings.static_root, &work_dir),
            app,
            tool,
            work_dir,
        }
    }

    pub fn app(&self) -> &AppDescriptor {
        &self.app
    }

    /// `<output_dir>/app.jsb3`
    pub fn manifest_path(&self) -> PathBuf {
        self.app.output_dir().join(MANIFEST_FILE_NAME)
    }

    /// The rewrite for this app, with paths relative to the working directory.
    pub fn cleaner(&self) -> ManifestCleaner {
        let output_dir = absolutize(self.app.output_dir(), &self.work_dir);
        ManifestCleaner::new(
            unix_relative(&self.static_root, &self.work_dir),
            unix_dir(&output_dir, &self.work_dir),
        )
    }

    /// Run `sencha create jsb` against the app's entry URL and return the
    /// raw manifest it produced.
    ///
    /// The tool writes into a private temporary directory that is removed
    /// when this returns.
    pub async fn create_manifest(&self) -> Result<String, BuildError> {
        let tmp = tempfile::Builder::new()
            .prefix("senchatools-jsb-")
            .tempdir()
            .map_err(|source| BuildError::WriteFailed {
                path: std::env::temp_dir(),
                source,
            })?;
        let path = tmp.path().join(MANIFEST_FILE_NAME);

        self.tool
            .invocation(["create", "jsb", "-a"])
            .arg(self.app.entry_url().as_str())
            .arg("-p")
            .arg(&path)
            .run(&self.work_dir)
            .await?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| BuildError::ManifestUnreadable { path, source })
    }

    /// Apply [`ManifestCleaner`] to a raw manifest.
    pub fn clean_manifest(&self, raw: &str) -> Result<String, BuildError> {
        Ok(self.cleaner().clean(raw)?)
    }

    pub async fn create_clean_manifest(&self) -> Result<String, BuildError> {
        let raw = self.create_manifest().await?;
        tracing::debug!("Original manifest for {}:\n{}", self.app.name(), raw);

        let cleaned = self.clean_manifest(&raw)?;
        tracing::debug!("Cleaned manifest for {}:\n{}", self.app.name(), cleaned);

        Ok(cleaned)
    }

    /// Create, clean and persist the manifest to [`Self::manifest_path`].
    pub async fn write_manifest(&self) -> Result<String, BuildError> {
        let cleaned = self.create_clean_manifest().await?;
        let path = self.manifest_path();

        tokio::fs::create_dir_all(self.app.output_dir())
            .await
            .map_err(|source| BuildError::WriteFailed {
                path: self.app.output_dir().to_path_buf(),
                source,
            })?;
        tokio::fs::write(&path, &cleaned)
            .await
            .map_err(|source| BuildError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Wrote {}", path.display());
        Ok(cleaned)
    }

    /// Read the manifest persisted by an earlier [`Self::write_manifest`].
    pub async fn read_manifest(&self) -> Result<String, BuildError> {
        let path = self.manifest_path();
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| BuildError::ManifestUnreadable { path, source })
    }

    /// Run `sencha build` with `manifest`.
    ///
    /// The manifest is written to a uniquely named `temp-app-*.jsb3` in the
    /// working directory, since the tool resolves the manifest's relative
    /// paths against the manifest's own location. The file is removed on
    /// every exit path.
    pub async fn build(&self, manifest: &str, compress: bool) -> Result<(), BuildError> {
        let tmp = tempfile::Builder::new()
            .prefix("temp-app-")
            .suffix(".jsb3")
            .tempfile_in(&self.work_dir)
            .map_err(|source| BuildError::WriteFailed {
                path: self.work_dir.clone(),
                source,
            })?;

        tokio::fs::write(tmp.path(), manifest)
            .await
            .map_err(|source| BuildError::WriteFailed {
                path: tmp.path().to_path_buf(),
                source,
            })?;

        let manifest_arg = tmp
            .path()
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| tmp.path().to_path_buf());

        let mut invocation = self
            .tool
            .invocation(["build", "-p"])
            .arg(manifest_arg)
            .arg("-d")
            .arg(self.app.output_dir());
        if !compress {
            invocation = invocation.arg("--nocompress");
        }

        invocation.run(&self.work_dir).await
    }

    /// The whole pipeline for one app.
    ///
    /// With `recreate` the manifest is regenerated and persisted before the
    /// build; without it the persisted manifest is reused as is.
    pub async fn configure_and_build(&self, compress: bool, recreate: bool) -> Result<(), BuildError> {
        let manifest = if recreate {
            self.write_manifest().await?
        } else {
            self.read_manifest().await?
        };
        self.build(&manifest, compress).await
    }
}
