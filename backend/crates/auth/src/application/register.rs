//! Register Use Case
//!
//! Creates a new, unverified user account and mints its email-verification
//! token. No session or access token is issued until the email is
//! confirmed (verification-gated flow).

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{OneTimeToken, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, person_name::PersonName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_id: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = PersonName::new(input.name)?;
        let email = Email::new(input.email)?;

        let password = ClearTextPassword::new(input.password)?;

        // Pre-check; a concurrent insert still surfaces as EmailTaken
        // through the unique-constraint translation in the repository.
        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password.hash(self.config.pepper())?;
        let verification = OneTimeToken::generate(self.config.verification_ttl);

        let user = User::register_local(name, email, password_hash, verification);

        self.repo.create(&user).await?;

        // TODO: send this link through the email service once it lands;
        // logging stands in for delivery meanwhile.
        if let Some(token) = &user.verification {
            tracing::info!(
                user_id = %user.user_id,
                url = %format!(
                    "{}/auth/verify-email/{}",
                    self.config.api_base_url, token.token
                ),
                "Verification URL generated"
            );
        }

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user_id: user.user_id.to_string(),
        })
    }
}
