//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, RequestPasswordResetUseCase,
    ResetPasswordInput, ResetPasswordUseCase, VerifyEmailUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            message: "Registration successful. Please check your e-mail to activate your account."
                .to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: UserResponse {
            id: output.user.id,
            name: output.user.name,
            email: output.user.email,
            role: output.user.role,
        },
    }))
}

// ============================================================================
// Email verification
// ============================================================================

/// GET /auth/verify-email/{token}
///
/// Redirects to the front-end login page with a confirmation flag; the
/// core contract is simply "mark verified".
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Path(token): Path<String>,
) -> AuthResult<Redirect>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone());
    use_case.execute(&token).await?;

    Ok(Redirect::to(&format!(
        "{}/login?verified=true",
        state.config.frontend_url
    )))
}

// ============================================================================
// Password reset
// ============================================================================

/// POST /auth/forgot-password
///
/// Always answers 200 so the endpoint cannot be used to probe which
/// e-mails are registered.
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestPasswordResetUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(req.email).await?;

    Ok(Json(MessageResponse {
        message: "If that e-mail is registered, a reset link has been sent.".to_string(),
    }))
}

/// POST /auth/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            token: req.token,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully.".to_string(),
    }))
}
