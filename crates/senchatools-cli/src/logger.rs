//! Logging setup for the senchatools CLI.
//!
//! Everything logs through `tracing`. The subscriber is installed once by
//! `main` with a filter derived from the command-line verbosity:
//!
//! | verbosity | level |
//! |-----------|-------|
//! | 0 (`--quiet`) | error |
//! | 1 (default) | info |
//! | 2+ (`-v`) | debug |
//!
//! `RUST_LOG` replaces the default-verbosity filter when it is set.
//!
//! # Example
//!
//! ```rust,no_run
//! use senchatools_cli::logger::init_logger;
//!
//! init_logger(1, false);
//! tracing::info!("Building calendar");
//! ```

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Verbosity used when neither `-v` nor `--quiet` is given.
pub const DEFAULT_VERBOSITY: u8 = 1;

/// Log level for a verbosity value.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Filter directive enabling `level` for the senchatools crates only.
pub fn directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("senchatools_cli={level},senchatools_config={level}")
}

/// Install the global subscriber.
///
/// # Arguments
///
/// * `verbosity` - 0 for errors only, 1 for info, 2 or more for debug
/// * `no_color` - Disable ANSI colors
pub fn init_logger(verbosity: u8, no_color: bool) {
    let explicit = directives(level_for(verbosity));
    let filter = if verbosity == DEFAULT_VERBOSITY {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&explicit))
    } else {
        EnvFilter::new(&explicit)
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
