//! Error handling for the senchatools CLI.
//!
//! This module provides a hierarchical error type system using `thiserror`.
//! Each variant is written to be actionable: it says which step failed and,
//! where there is one, what the user can do about it.
//!
//! # Architecture
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`BuildError`, `ManifestError`, `ResolveError`,
//!   `ConfigError`) carry the detail
//! - **Error conversion** is automatic via `#[from]` attributes
//! - **Context helpers** (`ResultExt`) prefix a message to any error
//!
//! # Example
//!
//! ```rust,no_run
//! use senchatools_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).context(format!("Reading {}", path.display()))
//! }
//! ```

mod miette;

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub use self::miette::cli_error_to_miette;
pub use crate::apps::ResolveError;
pub use crate::sencha::ManifestError;
pub use senchatools_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid settings, or a failed precondition
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A single app's build failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The module resolver failed unexpectedly
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// A requested app is not among the discovered apps
    #[error("Could not find app \"{0}\"\n\nHint: Run 'senchatools list' to see the apps that can be built")]
    AppNotFound(String),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The build server could not bind or failed while serving
    #[error("Build server failed on {addr}: {source}\n\nHint: Is another server already using this port? Use --dont-use-buildserver to build against it")]
    ServerStartup {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Failures while building one app.
///
/// Any of these aborts the current app; nothing is retried and no partial
/// manifest is used.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The generated manifest could not be parsed or no longer has the
    /// expected structure
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The external tool exited unsuccessfully
    #[error("`{invocation}` failed ({status})\n\nHint: Re-run with -vv to see the exact command line")]
    ExternalTool {
        /// Command line that was run
        invocation: String,
        /// Exit status reported by the OS
        status: ExitStatus,
    },

    /// The external tool could not be started at all
    #[error("Could not run `{program}`: {source}\n\nHint: Install Sencha Cmd / SDK Tools or set sencha_command in senchatools.toml")]
    ToolNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran longer than `tool_timeout_secs`
    #[error("`{invocation}` did not finish within {secs}s and was killed")]
    ToolTimeout { invocation: String, secs: u64 },

    /// `sencha create jsb` finished but its output could not be read
    #[error("Could not read manifest {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the manifest or preparing the output directory failed
    #[error("Failed to write {}: {source}\n\nHint: Check output directory permissions", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
