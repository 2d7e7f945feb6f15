//! Password Reset Use Cases
//!
//! Two-step flow: request a reset link, then redeem the token with a new
//! password. The request step always reports success so it cannot be used
//! to probe which emails are registered.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::OneTimeToken;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Request password reset use case
pub struct RequestPasswordResetUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RequestPasswordResetUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, email: String) -> AuthResult<()> {
        // A malformed email gets the same silent success as an unknown one
        let Ok(email) = Email::new(email) else {
            return Ok(());
        };

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown e-mail");
            return Ok(());
        };

        if !user.is_active || !user.credential.is_local() {
            return Ok(());
        }

        let token = OneTimeToken::generate(self.config.reset_ttl);

        // TODO: send this link through the email service once it lands;
        // logging stands in for delivery meanwhile.
        tracing::info!(
            user_id = %user.user_id,
            url = %format!("{}/auth/reset-password/{}", self.config.api_base_url, token.token),
            "Password reset URL generated"
        );

        user.start_password_reset(token);
        self.repo.update(&user).await?;

        Ok(())
    }
}

/// Reset password input
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_reset_token(&input.token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let pending = user
            .password_reset
            .as_ref()
            .ok_or(AuthError::InvalidToken)?;
        if pending.is_expired() {
            return Err(AuthError::InvalidToken);
        }

        let password = ClearTextPassword::new(input.new_password)?;
        let password_hash = password.hash(self.config.pepper())?;

        user.set_password(password_hash);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");

        Ok(())
    }
}
