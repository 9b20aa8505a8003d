// SPDX-License-Identifier: Apache-2.0
//! # Session Routes
//!
//! - POST /api/v1/sessions — Log in with the configured credentials
//!
//! The returned `sessionId` is the bearer token for every other route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::sessions::Session;
use crate::state::AppState;

fn default_provider() -> String {
    "Local".to_string()
}

/// Body of `POST /api/v1/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default = "default_provider")]
    pub provider: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/sessions", post(login))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Session>, AppError> {
    let Json(request) = payload?;

    if !state
        .config
        .accepts(&request.username, &request.password, &request.provider)
    {
        tracing::warn!(username = %request.username, provider = %request.provider, "login rejected");
        return Err(AppError::Unauthorized("invalid username or password".into()));
    }

    let session = state.issue_session();
    tracing::info!(user_id = %session.user_id, "session issued");
    Ok(Json(session))
}
