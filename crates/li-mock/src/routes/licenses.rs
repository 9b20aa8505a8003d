// SPDX-License-Identifier: Apache-2.0
//! # License Routes
//!
//! Routes (all require a session):
//! - GET    /api/v1/licenses — Aggregate license summary
//! - POST   /api/v1/licenses — Add a license key
//! - DELETE /api/v1/licenses/{id} — Remove a license

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::SessionIdentity;
use crate::error::AppError;
use crate::registry::{License, LicenseSummary};
use crate::state::AppState;

/// Body of `POST /api/v1/licenses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLicenseRequest {
    pub key: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/licenses", get(list_licenses).post(add_license))
        .route("/api/v1/licenses/{id}", delete(remove_license))
}

async fn list_licenses(
    State(state): State<AppState>,
    _identity: SessionIdentity,
) -> Json<LicenseSummary> {
    Json(state.registry().summary())
}

/// The body is parsed as JSON whatever its `Content-Type` says.
async fn add_license(
    State(state): State<AppState>,
    identity: SessionIdentity,
    body: Bytes,
) -> Result<(StatusCode, Json<License>), AppError> {
    let request: AddLicenseRequest = serde_json::from_slice(&body)?;
    let license = state.registry_mut().add(&request.key);
    tracing::info!(license_id = %license.id, user_id = %identity.user_id, "added license");
    Ok((StatusCode::CREATED, Json(license)))
}

/// Answers with an empty body either way; 404 when the id is unknown.
async fn remove_license(
    State(state): State<AppState>,
    identity: SessionIdentity,
    Path(id): Path<String>,
) -> StatusCode {
    let removed = state.registry_mut().remove(&id);
    match removed {
        Ok(_) => {
            tracing::info!(license_id = %id, user_id = %identity.user_id, "deleted license");
            StatusCode::OK
        }
        Err(err) => {
            tracing::info!(license_id = %id, error = %err, "attempted to delete nonexistent license");
            StatusCode::NOT_FOUND
        }
    }
}
