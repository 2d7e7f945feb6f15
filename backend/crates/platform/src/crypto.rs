//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Byte length of generated one-time tokens
const ONE_TIME_TOKEN_BYTES: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as URL-safe base64 (no padding)
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a random, URL-safe one-time token
///
/// Used for email verification and password reset links. 256 bits of
/// entropy, safe to embed in a URL path segment.
pub fn one_time_token() -> String {
    to_base64_url(&random_bytes(ONE_TIME_TOKEN_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_length() {
        assert_eq!(random_bytes(32).len(), 32);
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(64).len(), 64);
    }

    #[test]
    fn test_random_bytes_not_all_zeros() {
        let bytes = random_bytes(32);
        assert!(
            bytes.iter().any(|&b| b != 0),
            "Random bytes should not be all zeros"
        );
    }

    #[test]
    fn test_one_time_token_is_url_safe() {
        let token = one_time_token();
        // 32 bytes -> 43 base64url chars, no padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_one_time_tokens_are_unique() {
        assert_ne!(one_time_token(), one_time_token());
    }
}
