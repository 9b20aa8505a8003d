// SPDX-License-Identifier: Apache-2.0
//! # Session Store
//!
//! Bearer sessions accepted by the authentication gate. Sessions are
//! issued by the login endpoint or minted directly by a test fixture.
//! TTLs are reported to clients but never enforced.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A live session: the bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
    /// Seconds until expiry, as advertised to the client.
    pub ttl: u64,
}

/// Mapping from session id to user id.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new session for `user_id`.
    pub fn issue(&mut self, user_id: &str, ttl: u64) -> Session {
        let session_id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !self.sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        self.sessions
            .insert(session_id.clone(), user_id.to_string());
        Session {
            user_id: user_id.to_string(),
            session_id,
            ttl,
        }
    }

    /// Look up the user owning `session_id`.
    pub fn user_for(&self, session_id: &str) -> Option<&str> {
        self.sessions.get(session_id).map(String::as_str)
    }

    /// Forget a session. Returns whether it existed.
    pub fn revoke(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
