//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export HashingParams from platform
pub use platform::password::HashingParams;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Deadline applied to each HTTP request
    pub request_timeout: Duration,
    /// Argon2id cost used when registering users
    pub password_params: HashingParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600), // 1 hour
            request_timeout: Duration::from_secs(5),
            password_params: HashingParams::default(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
