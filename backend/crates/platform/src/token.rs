//! Access Tokens (JWT)
//!
//! Issues and verifies signed, time-limited bearer tokens (HS256).
//! The token carries the authenticated user's id and role code;
//! everything else is looked up per request.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 3600;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token signature/shape is invalid
    #[error("Invalid token")]
    Invalid,

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token could not be created
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (user id, UUID string)
    pub sub: String,
    /// Caller role code, opaque to this layer
    pub role: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration time (unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl AccessClaims {
    pub fn new(subject: String, role: String, issuer: String, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject,
            role,
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
            iss: issuer,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issues and verifies access tokens with a shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Issue a signed token for the given subject and role
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        let claims = AccessClaims::new(
            subject.to_string(),
            role.to_string(),
            self.issuer.clone(),
            self.ttl,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret-at-least-32-bytes!!!", "api-test", Duration::hours(1))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let svc = service();
        let subject = uuid::Uuid::new_v4().to_string();

        let token = svc.issue(&subject, "COMMON").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.role, "COMMON");
        assert_eq!(claims.iss, "api-test");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let svc = service();
        let other = TokenService::new(b"another-secret-32-bytes-long!!!!", "api-test", Duration::hours(1));

        let token = svc.issue("subject", "COMMON").unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_wrong_issuer() {
        let svc = service();
        let other = TokenService::new(
            b"test-secret-at-least-32-bytes!!!",
            "someone-else",
            Duration::hours(1),
        );

        let token = other.issue("subject", "COMMON").unwrap();
        assert!(matches!(svc.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let svc = TokenService::new(
            b"test-secret-at-least-32-bytes!!!",
            "api-test",
            Duration::seconds(-120),
        );

        let token = svc.issue("subject", "COMMON").unwrap();
        assert!(matches!(svc.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let svc = service();
        assert!(matches!(
            svc.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }
}
