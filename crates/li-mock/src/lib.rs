// SPDX-License-Identifier: Apache-2.0
//! # li-mock — Log Insight Licensing Mock Server
//!
//! In-memory stand-in for the licensing surface of a Log Insight server,
//! used as a test fixture for client code. State lives in one [`AppState`]
//! owned by the server instance and is discarded with it.
//!
//! ## API Surface
//!
//! | Method | Path                      | Session | Module                  |
//! |--------|---------------------------|---------|-------------------------|
//! | GET    | `/api/v1/licenses`        | yes     | [`routes::licenses`]    |
//! | POST   | `/api/v1/licenses`        | yes     | [`routes::licenses`]    |
//! | DELETE | `/api/v1/licenses/{id}`   | yes     | [`routes::licenses`]    |
//! | GET    | `/api/v1/version`         | no      | [`routes::version`]     |
//! | POST   | `/api/v1/sessions`        | no      | [`routes::sessions`]    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → require_session (license routes only) → Handler
//! ```
//!
//! ## Fixture Use
//!
//! [`server::MockServer`] binds an ephemeral loopback port and serves
//! [`app`] in the background until dropped.

pub mod auth;
pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;

use axum::http::Uri;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::MockConfig;
pub use error::AppError;
pub use registry::{License, LicenseRegistry, LicenseSummary, LicenseType};
pub use server::MockServer;
pub use state::AppState;

/// Assemble the full route table.
///
/// The license routes sit behind [`auth::require_session`]; the version
/// and login routes are open. Route conflicts panic here, at construction.
pub fn app(state: AppState) -> Router {
    let authenticated = routes::licenses::router()
        .route_layer(from_fn_with_state(state.clone(), auth::require_session));

    Router::new()
        .merge(routes::version::router())
        .merge(routes::sessions::router())
        .merge(authenticated)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
