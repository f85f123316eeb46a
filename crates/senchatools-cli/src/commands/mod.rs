//! Command implementations for the senchatools CLI.
//!
//! - [`build`] - Build one or more apps, optionally rebuilding on change
//! - [`list`] - List discoverable apps
//!
//! Each command provides an `execute` function that takes the parsed
//! command arguments and returns a Result.

pub mod build;
pub mod list;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use list::execute as list_execute;
