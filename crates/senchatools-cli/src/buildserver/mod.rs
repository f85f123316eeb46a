//! Short-lived HTTP server that runs only while a build needs it.
//!
//! `sencha create jsb` discovers an app's classes by loading its entry page,
//! so something has to serve that page for the duration of the call. The
//! server binds first, serves on a background task while the build runs on
//! the caller's task, and is shut down and joined before control returns,
//! whether the build succeeded or not.

mod auth;
mod site;

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

use crate::error::{CliError, Result};

pub use auth::{AutoLogin, Identity, REMOTE_USER_HEADER};
pub use site::HostSite;

/// A bound, not yet serving, build server.
#[derive(Debug)]
pub struct BuildServer {
    listener: TcpListener,
    addr: String,
}

impl BuildServer {
    /// Bind `host:port`.
    ///
    /// # Errors
    ///
    /// `ServerStartup` if the address cannot be bound.
    pub async fn bind(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|source| CliError::ServerStartup {
                addr: addr.clone(),
                source,
            })?;
        Ok(Self { listener, addr })
    }

    /// Host and port taken from a URL such as an app's entry URL.
    pub fn address_of(url: &Url) -> Result<(String, u16)> {
        let host = url
            .host_str()
            .ok_or_else(|| CliError::InvalidArgument(format!("{url} has no host")))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| CliError::InvalidArgument(format!("{url} has no port")))?;
        Ok((host.trim_matches(['[', ']']).to_string(), port))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve `app` while `build_fn` runs, then shut down.
    ///
    /// In-flight requests are drained and the server task is joined before
    /// this returns. The build's own error takes precedence over a server
    /// failure.
    pub async fn run<F, T, E>(self, app: Router, build_fn: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        CliError: From<E>,
    {
        let Self { listener, addr } = self;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });
        tracing::info!("Listening on http://{}", addr);

        let outcome = build_fn.await;

        tracing::info!("Stopping buildserver http://{} ...", addr);
        let _ = shutdown_tx.send(());
        let served = server.await;
        tracing::info!("... buildserver stopped");

        let value = outcome.map_err(CliError::from)?;
        match served {
            Ok(Ok(())) => Ok(value),
            Ok(Err(source)) => Err(CliError::ServerStartup { addr, source }),
            Err(join) => Err(CliError::Custom(format!(
                "Build server task on {addr} failed: {join}"
            ))),
        }
    }
}

/// Bind, serve `app` for the duration of `build_fn`, and tear down.
pub async fn run_with_server<F, T, E>(host: &str, port: u16, app: Router, build_fn: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    CliError: From<E>,
{
    BuildServer::bind(host, port).await?.run(app, build_fn).await
}
