//! User Entity
//!
//! Identity and credential record. The authentication state machine lives
//! here: Registered-Unverified -> Verified, with an Active/Inactive ops
//! toggle. Login requires Verified AND Active.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, person_name::PersonName, user_role::UserRole};

/// How a user authenticates. Exactly one variant is persisted per user;
/// the two are mutually exclusive by construction.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Local password credential (Argon2id PHC hash)
    Local { password_hash: HashedPassword },
    /// Federated identity from an external provider
    Federated { provider_uid: String },
}

impl Credential {
    pub fn is_local(&self) -> bool {
        matches!(self, Credential::Local { .. })
    }
}

/// A single-use token with an expiry, for email verification and
/// password reset links.
#[derive(Debug, Clone)]
pub struct OneTimeToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Mint a fresh random token valid for `ttl`
    pub fn generate(ttl: Duration) -> Self {
        Self {
            token: platform::crypto::one_time_token(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Display name
    pub name: PersonName,
    /// Unique, lowercased login email
    pub email: Email,
    /// Local password or federated identity
    pub credential: Credential,
    /// Role (Common, Admin)
    pub role: UserRole,
    /// Inactive users are excluded from login instead of deleted
    pub is_active: bool,
    /// Set once the verification link is followed
    pub is_verified: bool,
    /// Pending email-verification token
    pub verification: Option<OneTimeToken>,
    /// Pending password-reset token
    pub password_reset: Option<OneTimeToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Register a new local-credential user, unverified, with a pending
    /// verification token.
    pub fn register_local(
        name: PersonName,
        email: Email,
        password_hash: HashedPassword,
        verification: OneTimeToken,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            credential: Credential::Local { password_hash },
            role: UserRole::default(),
            is_active: true,
            is_verified: false,
            verification: Some(verification),
            password_reset: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether login is permitted at all (Verified check is separate so
    /// the caller can surface a distinct signal)
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Confirm the email address and consume the verification token
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification = None;
        self.updated_at = Utc::now();
    }

    /// Drop a pending verification token without verifying, so an
    /// expired one does not linger in the record
    pub fn clear_verification(&mut self) {
        self.verification = None;
        self.updated_at = Utc::now();
    }

    /// Begin a password reset, replacing any pending token
    pub fn start_password_reset(&mut self, token: OneTimeToken) {
        self.password_reset = Some(token);
        self.updated_at = Utc::now();
    }

    /// Replace the local password and consume the reset token
    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.credential = Credential::Local { password_hash };
        self.password_reset = None;
        self.updated_at = Utc::now();
    }

    /// Ops toggle; inactive users cannot log in
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }
}
