//! Verify Email Use Case
//!
//! Consumes a verification token and marks the account verified.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Verify email use case
pub struct VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Tokens are single-use: the match clears them, and an expired or
    /// unknown token is indistinguishable to the caller.
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let pending = user.verification.as_ref().ok_or(AuthError::InvalidToken)?;
        if pending.is_expired() {
            // Expired tokens are consumed too; a future resend endpoint
            // will mint a fresh one
            user.clear_verification();
            self.repo.update(&user).await?;
            return Err(AuthError::InvalidToken);
        }

        user.mark_verified();
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "E-mail verified");

        Ok(())
    }
}
