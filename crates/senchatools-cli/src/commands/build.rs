//! Build command implementation.
//!
//! This module implements `senchatools build`, which drives the sencha
//! toolchain for one app (`--url` + `--outdir`), one discovered app
//! (`--app`), or every discovered app (`--buildall`).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use senchatools_config::{ConfigError, Settings};

use crate::apps::{discover_apps, find_app, AppDescriptor, DirectoryResolver};
use crate::buildserver::{self, BuildServer, HostSite};
use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::sencha::paths::absolutize;
use crate::sencha::{SenchaBuilder, Tool};
use crate::ui;
use crate::watch::{WatchFilter, WatchSession};

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load settings (defaults, file, environment, `--urlpattern`)
/// 2. Check `debug_mode` unless `--no-check-settings`
/// 3. Run the static collection command unless `--no-collectstatic`
/// 4. Build each target app in turn, stopping at the first failure
///
/// With `--watch DIR` nothing is built up front; every accepted change below
/// `DIR` repeats steps 2-4.
pub async fn execute(args: BuildArgs, config: Option<&Path>) -> Result<()> {
    let work_dir = utils::working_dir()?;
    let settings = utils::load_settings(&work_dir, config, args.urlpattern.as_deref())?;
    let plan = BuildPlan::new(args, settings, work_dir);

    match plan.args.watch.clone() {
        Some(dir) => plan.watch(&dir).await,
        None => plan.run().await.map(|_| ()),
    }
}

/// A fully configured build invocation.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    args: BuildArgs,
    settings: Settings,
    work_dir: PathBuf,
}

impl BuildPlan {
    pub fn new(args: BuildArgs, settings: Settings, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            args,
            settings,
            work_dir: work_dir.into(),
        }
    }

    /// The apps selected by `--url`/`--outdir`, `--app` or `--buildall`.
    ///
    /// # Errors
    ///
    /// `AppNotFound` when `--app` does not name a buildable app.
    pub fn targets(&self) -> Result<Vec<AppDescriptor>> {
        if let (Some(url), Some(outdir)) = (&self.args.url, &self.args.outdir) {
            return Ok(vec![AppDescriptor::new(
                url.to_string(),
                absolutize(outdir, &self.work_dir),
                url.clone(),
            )]);
        }

        let resolver = DirectoryResolver::from_settings(&self.settings);

        if let Some(name) = &self.args.app {
            let app = find_app(&resolver, name)?
                .ok_or_else(|| CliError::AppNotFound(name.clone()))?;
            return Ok(vec![app.describe(&self.settings)?]);
        }

        if self.args.buildall {
            let apps = discover_apps(&resolver)?;
            if apps.is_empty() {
                ui::warning("No ExtJS apps found among installed_apps");
            }
            return apps
                .iter()
                .map(|app| app.describe(&self.settings).map_err(CliError::from))
                .collect();
        }

        Err(CliError::InvalidArgument(
            "One of --url and --outdir, --app or --buildall is required".to_string(),
        ))
    }

    /// Check settings, collect static files and build every target.
    ///
    /// Returns how long each app took.
    pub async fn run(&self) -> Result<Vec<(String, Duration)>> {
        self.check_settings()?;
        self.collect_static().await?;

        let targets = self.targets()?;
        let site = self.host_site()?;

        let mut timings = Vec::with_capacity(targets.len());
        for app in &targets {
            let started = Instant::now();
            self.build_app(app, site.as_ref()).await?;
            timings.push((app.name().to_string(), started.elapsed()));
        }

        if timings.len() > 1 {
            ui::print_build_summary(&timings);
        }
        Ok(timings)
    }

    /// Rebuild on every accepted change below `dir` until Ctrl+C.
    pub async fn watch(&self, dir: &Path) -> Result<()> {
        let filter = WatchFilter::from_settings(&self.settings.watch)?;
        let session = WatchSession::new(absolutize(dir, &self.work_dir), filter);
        session
            .run(move || async move { self.run().await.map(|_| ()) })
            .await
    }

    fn check_settings(&self) -> Result<()> {
        if self.args.no_check_settings {
            tracing::info!("Skipping check for debug_mode");
            return Ok(());
        }
        if !self.settings.debug_mode {
            return Err(ConfigError::DebugModeDisabled.into());
        }
        Ok(())
    }

    async fn collect_static(&self) -> Result<()> {
        if self.args.no_collectstatic {
            tracing::info!("Skipping collectstatic");
            return Ok(());
        }

        let Some(command) = &self.settings.collectstatic_command else {
            tracing::info!("collectstatic_command is not set; skipping collectstatic");
            return Ok(());
        };

        tracing::info!("Running collectstatic: {}", command);
        let timeout = self.settings.tool_timeout_secs.map(Duration::from_secs);
        Tool::shell_command(command, timeout)
            .run(&self.work_dir)
            .await?;
        Ok(())
    }

    /// The site to serve, when manifests are created against our own server.
    fn host_site(&self) -> Result<Option<HostSite>> {
        if self.args.no_jsbcreate || self.args.dont_use_buildserver {
            return Ok(None);
        }
        Ok(Some(HostSite::from_settings(&self.settings)?))
    }

    async fn build_app(&self, app: &AppDescriptor, site: Option<&HostSite>) -> Result<()> {
        let single = self.args.url.is_some();
        if !single {
            ui::info(&format!("Building {} ({}).", app.name(), app.entry_url()));
        }

        let builder = SenchaBuilder::new(app.clone(), &self.settings, &self.work_dir);
        let compress = !self.args.nocompress;
        let recreate = !self.args.no_jsbcreate;

        match site {
            Some(site) if recreate => {
                let (host, port) = BuildServer::address_of(app.entry_url())?;
                buildserver::run_with_server(&host, port, site.router(), builder.write_manifest())
                    .await?;
                tracing::info!(
                    "Building app-all.js from {} (copied to a temp-app-*.jsb3 file)",
                    builder.manifest_path().display()
                );
                builder.configure_and_build(compress, false).await?;
            }
            _ => builder.configure_and_build(compress, recreate).await?,
        }

        if single {
            ui::success(&format!(
                "Successfully built {}. Results are in: {}",
                app.entry_url(),
                app.output_dir().display()
            ));
        } else {
            ui::success(&format!(
                "Successfully built {} ({}). Results are in: {}",
                app.name(),
                app.entry_url(),
                app.output_dir().display()
            ));
        }
        Ok(())
    }
}
