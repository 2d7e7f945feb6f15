//! Platform - Domain-agnostic capabilities
//!
//! Reusable building blocks with no knowledge of the business domain:
//! - `password`: Argon2id hashing and verification with policy checks
//! - `token`: signed, time-limited access tokens (JWT)
//! - `crypto`: random one-time tokens and related helpers

pub mod crypto;
pub mod password;
pub mod token;
