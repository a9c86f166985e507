//! Server lifecycle: bind once at startup, accept until terminated.

mod connection;
mod listener;

use crate::config::{AppState, Config};
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A bound, not-yet-running server.
///
/// Binding is separated from running so callers can learn the actual
/// address first; with port 0 the OS picks one.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Resolve config, canonicalize the root, and bind the listener.
    /// Any failure here is fatal to startup; there is no retry.
    pub fn bind(config: Config) -> anyhow::Result<Self> {
        let addr = config.socket_addr()?;
        let root = config.server.root.clone();
        let state = AppState::new(config)
            .with_context(|| format!("document root {} is not accessible", root.display()))?;
        let listener =
            listener::bind(addr).with_context(|| format!("failed to bind {addr}"))?;

        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn root(&self) -> &std::path::Path {
        &self.state.root
    }

    /// Accept connections until the task is dropped or aborted.
    ///
    /// Accept errors (e.g. EMFILE) are logged and the loop continues; they
    /// are transient, unlike bind errors.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    connection::spawn(stream, peer_addr, Arc::clone(&self.state));
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept connection");
                }
            }
        }
    }
}

/// Resolve when the process receives a termination signal.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::error!(error = %e, "failed to register SIGTERM handler");
            std::future::pending::<()>().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("SIGTERM received"),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("SIGINT received");
        }
    }
}

/// Resolve when the process receives ctrl-c (non-Unix fallback).
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("ctrl-c received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(root: &Path, port: u16) -> Config {
        let mut config =
            Config::load_from("/nonexistent/sitekit-test").expect("defaults should load");
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.server.root = root.to_path_buf();
        config
    }

    #[tokio::test]
    async fn bind_reports_the_ephemeral_port() {
        let root = TempDir::new().unwrap();
        let server = Server::bind(config_for(root.path(), 0)).unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn second_bind_on_the_same_port_is_fatal() {
        let root = TempDir::new().unwrap();
        let first = Server::bind(config_for(root.path(), 0)).unwrap();
        let port = first.local_addr().unwrap().port();

        let second = Server::bind(config_for(root.path(), port));
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn missing_root_is_fatal() {
        let config = config_for(Path::new("/nonexistent/sitekit-root"), 0);
        assert!(Server::bind(config).is_err());
    }
}
