//! senchatools - build Sencha/ExtJS apps with the sencha toolchain.
//!
//! # Architecture
//!
//! - [`apps`] - Finds buildable apps among the installed modules
//! - [`sencha`] - Runs `sencha create jsb` / `sencha build` and repairs the
//!   generated JSB3 manifest
//! - [`buildserver`] - Serves the project while the manifest is created
//! - [`watch`] - Rebuilds on file changes
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and listings
//! - `cli` / `commands` - Argument parsing and the commands themselves
//!
//! Settings come from the `senchatools-config` crate and are passed into
//! every component explicitly.
//!
//! # Example
//!
//! ```rust,no_run
//! use senchatools_cli::sencha::ManifestCleaner;
//!
//! # fn main() -> Result<(), senchatools_cli::sencha::ManifestError> {
//! let raw = std::fs::read_to_string("calendar/static/calendar/app.jsb3").unwrap();
//! let cleaner = ManifestCleaner::new("static", "calendar/static/calendar/");
//! println!("{}", cleaner.clean(&raw)?);
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod buildserver;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod sencha;
pub mod ui;
pub mod watch;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
