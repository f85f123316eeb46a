//! Include/exclude filtering of file system events.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use senchatools_config::{validate_pattern, ConfigError, WatchSettings};

/// `*` and `?` match `/` too, so `*.js` matches at any depth.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Why an event was dropped, or that it was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Directory,
    NotIncluded,
    Excluded(String),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Compiled watch patterns.
#[derive(Debug, Clone)]
pub struct WatchFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl WatchFilter {
    /// # Errors
    ///
    /// `InvalidValue` for a pattern that does not compile.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile("watch.include", include)?,
            exclude: compile("watch.exclude", exclude)?,
        })
    }

    pub fn from_settings(settings: &WatchSettings) -> Result<Self, ConfigError> {
        Self::new(&settings.include, &settings.exclude)
    }

    /// Decide on one event.
    ///
    /// Directories are always dropped. With a non-empty include list the
    /// path must match one of its patterns, and it must match no exclude
    /// pattern.
    pub fn check(&self, path: &Path, is_dir: bool) -> Verdict {
        if is_dir {
            return Verdict::Directory;
        }

        let path = path.to_string_lossy();
        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches_with(&path, MATCH_OPTIONS)) {
            return Verdict::NotIncluded;
        }

        match self.exclude.iter().find(|p| p.matches_with(&path, MATCH_OPTIONS)) {
            Some(pattern) => Verdict::Excluded(pattern.as_str().to_string()),
            None => Verdict::Accept,
        }
    }

    pub fn accepts(&self, path: &Path, is_dir: bool) -> bool {
        self.check(path, is_dir).is_accept()
    }

    pub fn include_patterns(&self) -> Vec<&str> {
        self.include.iter().map(Pattern::as_str).collect()
    }
}

fn compile(field: &str, patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns.iter().map(|p| validate_pattern(field, p)).collect()
}
