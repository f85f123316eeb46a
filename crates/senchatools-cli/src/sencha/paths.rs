//! Path rendering for manifest entries.
//!
//! The sencha tools want forward-slash paths relative to the directory they
//! run in, whatever the host platform.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Make `path` absolute against `base` and normalize `.`/`..` segments.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        base.join(path).clean()
    }
}

/// `path` relative to `base`, `/`-separated, `.` when they are the same.
///
/// Falls back to the absolute path when no relative form exists (for
/// example across Windows drive letters).
pub fn unix_relative(path: &Path, base: &Path) -> String {
    let path = absolutize(path, base);
    let rel = pathdiff::diff_paths(&path, base.clean()).unwrap_or(path);

    let parts: Vec<String> = rel
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else if parts == [String::new()] {
        "/".to_string()
    } else {
        parts.join("/")
    }
}

/// Like [`unix_relative`], terminated with a single `/`.
pub fn unix_dir(path: &Path, base: &Path) -> String {
    let mut rel = unix_relative(path, base);
    if !rel.ends_with('/') {
        rel.push('/');
    }
    rel
}
