use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;

use url::Url;

use crate::cli::validation::{parse_entry_url, parse_url_pattern};

/// Available senchatools subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build ExtJS apps
    ///
    /// Creates (or reuses) each app's app.jsb3 manifest and runs
    /// `sencha build` to produce app-all.js in the app's output directory.
    Build(BuildArgs),

    /// List the apps that `build --buildall` would build
    List(ListArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["url", "app", "buildall"])
))]
pub struct BuildArgs {
    /// URL of the app's HTML entry point
    ///
    /// Same as the --app-entry parameter of `sencha create jsb`, except
    /// that only URLs are supported. Requires --outdir.
    #[arg(long, value_name = "URL", value_parser = parse_entry_url, requires = "outdir")]
    pub url: Option<Url>,

    /// Output directory for the app given with --url
    #[arg(
        long,
        value_name = "DIR",
        requires = "url",
        conflicts_with_all = ["app", "buildall"]
    )]
    pub outdir: Option<PathBuf>,

    /// Build a single discovered app, by module identifier or app name
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Build every discovered app
    ///
    /// Any installed module with a `<module>/static/<name>/app` directory is
    /// an ExtJS app, served at the URL pattern and built into
    /// `<module>/static/<name>/`.
    #[arg(long)]
    pub buildall: bool,

    /// Entry URL pattern for --app and --buildall
    ///
    /// `{appname}` is replaced with the app name. Overrides url_pattern from
    /// the settings.
    #[arg(long, value_name = "PATTERN", value_parser = parse_url_pattern)]
    pub urlpattern: Option<String>,

    /// Forwarded to `sencha build`
    #[arg(long)]
    pub nocompress: bool,

    /// Reuse the existing app.jsb3 instead of running `sencha create jsb`
    #[arg(long)]
    pub no_jsbcreate: bool,

    /// Do not run collectstatic_command before building
    #[arg(long)]
    pub no_collectstatic: bool,

    /// Do not start the build server; use a server you run yourself
    #[arg(long)]
    pub dont_use_buildserver: bool,

    /// Build even when debug_mode is false
    #[arg(long)]
    pub no_check_settings: bool,

    /// Rebuild whenever a file below DIR changes
    #[arg(long, value_name = "DIR")]
    pub watch: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Entry URL pattern used for the listed URLs
    #[arg(long, value_name = "PATTERN", value_parser = parse_url_pattern)]
    pub urlpattern: Option<String>,
}
