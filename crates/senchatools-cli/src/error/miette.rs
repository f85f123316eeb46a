//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError, ManifestError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Manifest(ManifestError::Schema(detail)) => {
            miette::miette!(
                "The manifest generated by `sencha create jsb` has an unexpected structure: {}\n\n\
                 Hint: The sencha output format has changed; refusing to build a possibly corrupt app-all.js",
                detail
            )
        }
        BuildError::ExternalTool { invocation, status } => {
            miette::miette!("`{}` failed ({})", invocation, status)
        }
        _ => miette::miette!("{}", err),
    }
}
