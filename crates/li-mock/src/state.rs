// SPDX-License-Identifier: Apache-2.0
//! # Application State
//!
//! State owned by one mock server instance and handed to every route
//! handler through the `State` extractor. Clones share the same data, so
//! a test holding a clone can seed or inspect what the server serves.
//!
//! Locks are `parking_lot` and are never held across `.await` points.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::MockConfig;
use crate::registry::LicenseRegistry;
use crate::sessions::{Session, SessionStore};

/// Shared fixture state: license registry, sessions and configuration.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<MockConfig>,
    registry: Arc<RwLock<LicenseRegistry>>,
    sessions: Arc<RwLock<SessionStore>>,
}

impl AppState {
    /// Create state with the default configuration and the seeded registry.
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self::with_registry(config, LicenseRegistry::seeded())
    }

    /// Create state around an explicit starting registry.
    pub fn with_registry(config: MockConfig, registry: LicenseRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(registry)),
            sessions: Arc::new(RwLock::new(SessionStore::new())),
        }
    }

    pub fn registry(&self) -> RwLockReadGuard<'_, LicenseRegistry> {
        self.registry.read()
    }

    pub fn registry_mut(&self) -> RwLockWriteGuard<'_, LicenseRegistry> {
        self.registry.write()
    }

    pub fn sessions(&self) -> RwLockReadGuard<'_, SessionStore> {
        self.sessions.read()
    }

    /// Issue a session for the configured user without going through login.
    pub fn issue_session(&self) -> Session {
        self.sessions
            .write()
            .issue(&self.config.user_id, self.config.session_ttl)
    }

    /// Forget a session. Returns whether it existed.
    pub fn revoke_session(&self, session_id: &str) -> bool {
        self.sessions.write().revoke(session_id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
