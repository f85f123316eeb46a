//! The site served while `sencha create jsb` loads an app.

use std::path::{Path, PathBuf};

use axum::Router;
use senchatools_config::{ConfigError, Settings};
use tower_http::services::ServeDir;

use super::auth::AutoLogin;

/// Static files under `/static/`, the document root everywhere else.
#[derive(Debug, Clone)]
pub struct HostSite {
    static_root: PathBuf,
    document_root: PathBuf,
    auto_login: Option<AutoLogin>,
}

impl HostSite {
    pub fn new(static_root: impl Into<PathBuf>, document_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            document_root: document_root.into(),
            auto_login: None,
        }
    }

    /// Site described by the settings. The document root defaults to the
    /// project root.
    ///
    /// # Errors
    ///
    /// `MissingField` when auto-login is enabled without a user.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let document_root = settings
            .document_root
            .clone()
            .unwrap_or_else(|| settings.project_root.clone());

        let mut site = Self::new(settings.static_root.clone(), document_root);
        if settings.auto_login {
            site = site.with_auto_login(AutoLogin::from_settings(settings)?);
        }
        Ok(site)
    }

    pub fn with_auto_login(mut self, login: AutoLogin) -> Self {
        self.auto_login = Some(login);
        self
    }

    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            .nest_service("/static", ServeDir::new(&self.static_root))
            .fallback_service(ServeDir::new(&self.document_root));

        match &self.auto_login {
            Some(login) => login.clone().apply(router),
            None => router,
        }
    }
}
