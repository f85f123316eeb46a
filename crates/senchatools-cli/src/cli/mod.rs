//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `senchatools build` - Build one app, a named app, or every discovered app
//! - `senchatools list` - Show the apps `build --buildall` would build

mod commands;
mod tests;
mod validation;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::logger::DEFAULT_VERBOSITY;

pub use commands::{BuildArgs, Command, ListArgs};
pub use validation::{parse_entry_url, parse_url_pattern};

/// Build Sencha/ExtJS apps with the sencha toolchain
#[derive(Parser, Debug)]
#[command(
    name = "senchatools",
    version,
    about = "Build Sencha/ExtJS apps with the sencha toolchain",
    long_about = "Discovers ExtJS apps among the project's installed modules, generates their\n\
                  JSB3 manifests with `sencha create jsb` against a short-lived local server,\n\
                  repairs the manifests and bundles them with `sencha build`."
)]
pub struct Cli {
    /// Increase logging (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file to use instead of ./senchatools.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// 0 with `--quiet`, otherwise 1 plus the number of `-v` flags.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            DEFAULT_VERBOSITY.saturating_add(self.verbose)
        }
    }
}
