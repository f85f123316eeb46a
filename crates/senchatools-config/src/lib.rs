//! Settings for the `senchatools` build orchestrator.
//!
//! Every component receives its configuration through an explicit [`Settings`]
//! value instead of reading ambient globals. Settings are layered with figment:
//! defaults, then `senchatools.toml`, then `SENCHATOOLS_*` environment
//! variables, then whatever the caller merges on top (CLI flags).

pub mod discovery;
pub mod error;
pub mod settings;
pub mod validation;

pub use discovery::{ConfigDiscovery, CONFIG_FILE_NAME, ENV_PREFIX};
pub use error::{ConfigError, Result};
pub use settings::{Settings, WatchSettings, DEFAULT_URL_PATTERN};
pub use validation::validate_pattern;
