//! Login Use Case
//!
//! Authenticates a user and issues a bearer access token.
//!
//! Unknown email, inactive account, federated credential and wrong
//! password all collapse into `InvalidCredentials` so callers cannot
//! enumerate accounts. The unverified-email signal is distinct, but only
//! reachable with a correct password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{Credential, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Public projection of the authenticated user
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user: PublicUser,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.can_login() {
            return Err(AuthError::InvalidCredentials);
        }

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Credential::Local { password_hash } = &user.credential else {
            // Federated accounts have no password to check
            return Err(AuthError::InvalidCredentials);
        };

        if !password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Only after the password is proven, so the distinct signal does
        // not confirm account existence to strangers
        if !user.is_verified {
            return Err(AuthError::EmailNotVerified);
        }

        let token = self
            .config
            .token_service()
            .issue(&user.user_id.to_string(), user.role.code())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            token,
            user: Self::project(&user),
        })
    }

    fn project(user: &User) -> PublicUser {
        PublicUser {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
        }
    }
}
