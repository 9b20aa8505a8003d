// SPDX-License-Identifier: Apache-2.0
//! # Version Route
//!
//! - GET /api/v1/version — Fixed release document (no session required)

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub const RELEASE_NAME: &str = "GA";
pub const VERSION: &str = "1.2.3-4567890";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub release_name: String,
    pub version: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/version", get(version))
}

async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        release_name: RELEASE_NAME.to_string(),
        version: VERSION.to_string(),
    })
}
