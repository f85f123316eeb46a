//! Auto-login layer for the build server.
//!
//! `sencha create jsb` loads the app's entry page like a browser would, but
//! it cannot log in. When the host site requires a user, every request is
//! attributed to a fixed identity instead.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use senchatools_config::{ConfigError, Settings};

/// Header carrying the identity to the host site.
pub const REMOTE_USER_HEADER: HeaderName = HeaderName::from_static("x-remote-user");

/// The identity attached to each request, also available as a request
/// extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(Arc<str>);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Attaches a fixed identity to every request.
#[derive(Debug, Clone)]
pub struct AutoLogin {
    identity: Identity,
    header: HeaderValue,
}

impl AutoLogin {
    /// # Errors
    ///
    /// `InvalidValue` when `user` is empty or cannot be sent as a header.
    pub fn new(user: &str) -> Result<Self, ConfigError> {
        let invalid = |hint: &str| ConfigError::InvalidValue {
            field: "auto_login_user".to_string(),
            value: user.to_string(),
            hint: hint.to_string(),
        };

        if user.trim().is_empty() {
            return Err(invalid("The auto-login user cannot be empty"));
        }
        let header = HeaderValue::from_str(user)
            .map_err(|_| invalid("The auto-login user must be printable ASCII"))?;

        Ok(Self {
            identity: Identity(Arc::from(user)),
            header,
        })
    }

    /// The layer configured by `auto_login_user`.
    ///
    /// # Errors
    ///
    /// `MissingField` when no user is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let user = settings
            .auto_login_user
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: "auto_login_user".to_string(),
                hint: "auto_login is enabled, so set auto_login_user to the user the build server acts as"
                    .to_string(),
            })?;
        Self::new(user)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Wrap every route of `router`.
    pub fn apply(self, router: Router) -> Router {
        router.layer(middleware::from_fn_with_state(self, auto_login))
    }
}

async fn auto_login(State(login): State<AutoLogin>, mut req: Request, next: Next) -> Response {
    tracing::trace!("Auto-login as {} for {}", login.identity.as_str(), req.uri());
    req.headers_mut()
        .insert(REMOTE_USER_HEADER, login.header.clone());
    req.extensions_mut().insert(login.identity);
    next.run(req).await
}
