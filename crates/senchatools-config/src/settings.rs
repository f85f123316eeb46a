//! The settings struct threaded through every senchatools component.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// URL template used for discovered apps when none is configured.
pub const DEFAULT_URL_PATTERN: &str = "http://localhost:15041/{appname}/";

/// Project-wide settings.
///
/// Relative paths are interpreted against the directory the settings were
/// discovered in; see [`Settings::resolve_paths`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base directory for module resolution.
    pub project_root: PathBuf,

    /// Installed module identifiers, in declaration order.
    pub installed_apps: Vec<String>,

    /// Explicit identifier to directory mapping. Takes precedence over the
    /// dotted-path lookup beneath `project_root`.
    pub modules: BTreeMap<String, PathBuf>,

    /// Directory that collected static assets are written to and served from.
    pub static_root: PathBuf,

    /// Directory served for everything outside `/static/` by the build server.
    pub document_root: Option<PathBuf>,

    /// Entry URL template. `{appname}` is replaced with the app name.
    pub url_pattern: String,

    /// Whether the host project serves unbundled sources.
    pub debug_mode: bool,

    /// Wrap the build server's site in the auto-login layer.
    pub auto_login: bool,

    /// Identity the auto-login layer attaches to every build server request.
    /// Required when `auto_login` is on.
    pub auto_login_user: Option<String>,

    /// Executable used for `create jsb` and `build`.
    pub sencha_command: String,

    /// Shell command that collects static files before a build.
    pub collectstatic_command: Option<String>,

    /// Kill the external tool after this many seconds.
    pub tool_timeout_secs: Option<u64>,

    pub watch: WatchSettings,
}

/// Include/exclude glob patterns for the watch session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            installed_apps: Vec::new(),
            modules: BTreeMap::new(),
            static_root: PathBuf::from("static"),
            document_root: None,
            url_pattern: DEFAULT_URL_PATTERN.to_string(),
            debug_mode: false,
            auto_login: false,
            auto_login_user: None,
            sencha_command: "sencha".to_string(),
            collectstatic_command: None,
            tool_timeout_secs: None,
            watch: WatchSettings::default(),
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            include: vec!["*.js".to_string()],
            exclude: [
                "*.*.swp",
                "*~",
                "*.pyc",
                "*.pyo",
                "*app-all.js",
                "*all-classes.js",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Settings {
    /// Make every relative path absolute against `base` and clean it.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.project_root = resolve(base, &self.project_root);
        self.static_root = resolve(base, &self.static_root);
        self.document_root = self.document_root.map(|p| resolve(base, &p));
        for dir in self.modules.values_mut() {
            *dir = resolve(base, dir);
        }
        self
    }

    /// Expand the URL pattern for one app.
    pub fn app_url(&self, appname: &str) -> String {
        self.url_pattern.replace("{appname}", appname)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    use path_clean::PathClean;

    if path.is_absolute() {
        path.clean()
    } else {
        base.join(path).clean()
    }
}
