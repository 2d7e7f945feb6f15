//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use platform::token::TokenService;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Token issuer claim
    pub token_issuer: String,
    /// Access token lifetime
    pub token_ttl: Duration,
    /// Email-verification token lifetime
    pub verification_ttl: Duration,
    /// Password-reset token lifetime
    pub reset_ttl: Duration,
    /// Front-end base URL for verification redirects
    pub frontend_url: String,
    /// API base URL used when logging verification/reset links
    pub api_base_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_issuer: "client-api".to_string(),
            token_ttl: Duration::hours(24),
            verification_ttl: Duration::hours(24),
            reset_ttl: Duration::hours(1),
            frontend_url: "http://localhost:3000".to_string(),
            api_base_url: "http://localhost:3001/api/v1".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token service for this configuration
    pub fn token_service(&self) -> TokenService {
        TokenService::new(&self.token_secret, self.token_issuer.clone(), self.token_ttl)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
