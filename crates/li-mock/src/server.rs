// SPDX-License-Identifier: Apache-2.0
//! # Mock Server Fixture
//!
//! Runs [`crate::app`] on an ephemeral loopback port in a background task.
//! Each `MockServer` owns its own [`AppState`]; dropping the server stops
//! it and releases the state.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::MockConfig;
use crate::sessions::Session;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind mock server listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running mock server.
#[derive(Debug)]
pub struct MockServer {
    address: SocketAddr,
    state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    /// Start a server with the default configuration and seeded registry.
    pub async fn start() -> Result<Self, ServerError> {
        Self::start_with(AppState::new()).await
    }

    /// Start a server with custom login credentials.
    pub async fn start_with_config(config: MockConfig) -> Result<Self, ServerError> {
        Self::start_with(AppState::with_config(config)).await
    }

    /// Start a server around prepared state. The caller may keep a clone
    /// of `state` to seed or inspect the registry.
    pub async fn start_with(state: AppState) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .map_err(ServerError::Bind)?;
        let address = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = crate::app(state.clone());
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::error!(error = %e, "mock server stopped with error");
            }
        });

        tracing::debug!(%address, "mock server listening");
        Ok(Self {
            address,
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URI, e.g. `http://127.0.0.1:41234`.
    pub fn uri(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Issue a session for the configured user, skipping the login call.
    pub fn session(&self) -> Session {
        self.state.issue_session()
    }

    /// Stop the server and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "mock server task did not finish cleanly");
            }
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
