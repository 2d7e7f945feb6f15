//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::user::{Credential, OneTimeToken, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, person_name::PersonName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    provider_uid,
    user_role,
    is_active,
    is_verified,
    verification_token,
    verification_expires_at,
    reset_token,
    reset_expires_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, filter: &str, value: &str) -> AuthResult<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = $1",
            USER_COLUMNS, filter
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (password_hash, provider_uid) = credential_columns(&user.credential);
        let (verification_token, verification_expires_at) = token_columns(&user.verification);
        let (reset_token, reset_expires_at) = token_columns(&user.password_reset);

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                provider_uid,
                user_role,
                is_active,
                is_verified,
                verification_token,
                verification_expires_at,
                reset_token,
                reset_expires_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(password_hash)
        .bind(provider_uid)
        .bind(user.role.id())
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(verification_token)
        .bind(verification_expires_at)
        .bind(reset_token)
        .bind(reset_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // Losing an email race must look like any other duplicate
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS);

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_by("email", email.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_verification_token(&self, token: &str) -> AuthResult<Option<User>> {
        self.fetch_one_by("verification_token", token).await
    }

    async fn find_by_reset_token(&self, token: &str) -> AuthResult<Option<User>> {
        self.fetch_one_by("reset_token", token).await
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let (password_hash, provider_uid) = credential_columns(&user.credential);
        let (verification_token, verification_expires_at) = token_columns(&user.verification);
        let (reset_token, reset_expires_at) = token_columns(&user.password_reset);

        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                provider_uid = $5,
                user_role = $6,
                is_active = $7,
                is_verified = $8,
                verification_token = $9,
                verification_expires_at = $10,
                reset_token = $11,
                reset_expires_at = $12,
                updated_at = $13
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(password_hash)
        .bind(provider_uid)
        .bind(user.role.id())
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(verification_token)
        .bind(verification_expires_at)
        .bind(reset_token)
        .bind(reset_expires_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn credential_columns(credential: &Credential) -> (Option<&str>, Option<&str>) {
    match credential {
        Credential::Local { password_hash } => (Some(password_hash.as_phc_string()), None),
        Credential::Federated { provider_uid } => (None, Some(provider_uid.as_str())),
    }
}

fn token_columns(token: &Option<OneTimeToken>) -> (Option<&str>, Option<DateTime<Utc>>) {
    match token {
        Some(t) => (Some(t.token.as_str()), Some(t.expires_at)),
        None => (None, None),
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: Option<String>,
    provider_uid: Option<String>,
    user_role: i16,
    is_active: bool,
    is_verified: bool,
    verification_token: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    reset_token: Option<String>,
    reset_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        // The CHECK constraint guarantees exactly one credential column
        let credential = match (self.password_hash, self.provider_uid) {
            (Some(hash), None) => Credential::Local {
                password_hash: HashedPassword::from_phc_string(hash)
                    .map_err(|e| AuthError::Internal(e.to_string()))?,
            },
            (None, Some(provider_uid)) => Credential::Federated { provider_uid },
            _ => {
                return Err(AuthError::Internal(format!(
                    "User {} violates the exactly-one-credential invariant",
                    self.user_id
                )));
            }
        };

        let role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: PersonName::from_db(self.name),
            email: Email::from_db(self.email),
            credential,
            role,
            is_active: self.is_active,
            is_verified: self.is_verified,
            verification: zip_token(self.verification_token, self.verification_expires_at),
            password_reset: zip_token(self.reset_token, self.reset_expires_at),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn zip_token(token: Option<String>, expires_at: Option<DateTime<Utc>>) -> Option<OneTimeToken> {
    match (token, expires_at) {
        (Some(token), Some(expires_at)) => Some(OneTimeToken { token, expires_at }),
        _ => None,
    }
}
