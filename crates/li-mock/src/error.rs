// SPDX-License-Identifier: Apache-2.0
//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Error bodies follow the Log Insight shape: `errorMessage` plus a
//! machine-readable `errorCode`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
    /// e.g. "NOT_FOUND", "UNAUTHORIZED".
    pub error_code: String,
}

/// Application-level error type returned by handlers.
///
/// Every variant is a client error; the mock has no failure mode of its own.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown route or resource (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or unknown session (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");

        let body = ErrorBody {
            error_message: self.to_string(),
            error_code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("invalid JSON body: {err}"))
    }
}
