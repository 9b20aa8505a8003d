// SPDX-License-Identifier: Apache-2.0
//! # Mock Configuration
//!
//! Listening port and the single set of credentials the login endpoint
//! accepts. Built from defaults in tests and from `LI_MOCK_*` environment
//! variables in the standalone binary.

/// Runtime configuration for a mock server instance.
///
/// Custom `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Port for the standalone binary. Fixtures always bind an ephemeral port.
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Identity provider the credentials belong to, compared case-insensitively.
    pub provider: String,
    /// User id reported for sessions of the configured user.
    pub user_id: String,
    /// Session TTL in seconds advertised on login.
    pub session_ttl: u64,
}

impl std::fmt::Debug for MockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConfig")
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("provider", &self.provider)
            .field("user_id", &self.user_id)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

pub const DEFAULT_PORT: u16 = 9543;
pub const DEFAULT_SESSION_TTL: u64 = 1800;

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            username: "admin".to_string(),
            password: "VMware123!".to_string(),
            provider: "Local".to_string(),
            user_id: "01234567-89ab-cdef-0123-456789abcdef".to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl MockConfig {
    /// Build configuration from the environment, falling back to defaults.
    ///
    /// - `LI_MOCK_PORT`: listening port (invalid values are ignored with a warning)
    /// - `LI_MOCK_USERNAME`, `LI_MOCK_PASSWORD`, `LI_MOCK_PROVIDER`: accepted login
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("LI_MOCK_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "invalid LI_MOCK_PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            port,
            username: lookup("LI_MOCK_USERNAME").unwrap_or(defaults.username),
            password: lookup("LI_MOCK_PASSWORD").unwrap_or(defaults.password),
            provider: lookup("LI_MOCK_PROVIDER").unwrap_or(defaults.provider),
            ..defaults
        }
    }

    /// Whether a login attempt matches the configured user.
    pub fn accepts(&self, username: &str, password: &str, provider: &str) -> bool {
        self.username == username
            && self.password == password
            && self.provider.eq_ignore_ascii_case(provider)
    }
}
