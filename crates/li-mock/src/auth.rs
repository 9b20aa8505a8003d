// SPDX-License-Identifier: Apache-2.0
//! # Authentication Middleware
//!
//! Session gate in front of every license route.
//!
//! Clients authenticate with the session id returned by
//! `POST /api/v1/sessions`:
//!
//! ```text
//! Authorization: Bearer {sessionId}
//! ```
//!
//! Requests without a known session are answered with 401 before the
//! handler runs. Accepted requests carry a [`SessionIdentity`] in their
//! extensions, which handlers take as an extractor argument.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, injected by [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub session_id: String,
    pub user_id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for SessionIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("no session in request context".into()))
    }
}

/// Pull the session id out of an `Authorization` header value.
pub fn bearer_session_id(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests that do not carry a known session; otherwise attach
/// the caller's [`SessionIdentity`] and run the inner handler.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let session_id = match auth_header {
        Some(value) => match bearer_session_id(value) {
            Some(id) => id.to_string(),
            None => {
                tracing::warn!("authentication failed: non-Bearer authorization scheme");
                return AppError::Unauthorized("authorization header must use Bearer scheme".into())
                    .into_response();
            }
        },
        None => {
            tracing::warn!(path = %request.uri().path(), "authentication failed: missing authorization header");
            return AppError::Unauthorized("missing authorization header".into()).into_response();
        }
    };

    let user_id = state.sessions().user_for(&session_id).map(str::to_string);
    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(SessionIdentity {
                session_id,
                user_id,
            });
            next.run(request).await
        }
        None => {
            tracing::warn!("authentication failed: unknown session");
            AppError::Unauthorized("unknown or expired session".into()).into_response()
        }
    }
}
