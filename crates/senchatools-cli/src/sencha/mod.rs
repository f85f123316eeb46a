//! Everything that talks to the sencha toolchain.

pub mod builder;
pub mod manifest;
pub mod paths;
pub mod process;

pub use builder::{SenchaBuilder, MANIFEST_FILE_NAME};
pub use manifest::{clean_path, Manifest, ManifestCleaner, ManifestError};
pub use process::{Invocation, Tool};
