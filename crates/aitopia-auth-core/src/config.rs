//! Configuration types for token verification

use std::time::Duration;

/// Minimum accepted length of the shared HS256 secret
pub const MIN_SECRET_LEN: usize = 32;

/// Auth configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign and verify tokens
    pub jwt_secret: String,
    /// Lifetime of tokens issued by [`crate::TokenValidator::issue`]
    pub token_ttl: Duration,
    /// Clock skew tolerated when checking `exp`
    pub leeway: Duration,
}

impl AuthConfig {
    /// Create a new auth config
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(60 * 60), // 1 hour
            leeway: Duration::from_secs(30),
        }
    }

    /// Set issued token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set expiry leeway
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("leeway", &self.leeway)
            .finish()
    }
}
