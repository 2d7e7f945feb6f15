//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

/// Identity of the authenticated caller, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Middleware that requires a valid `Authorization: Bearer <token>` header
///
/// Verifies the token signature and expiry, then exposes the caller's
/// identity to downstream handlers as an [`AuthUser`] extension. Token
/// verification is stateless; no repository round trip.
pub async fn require_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::unauthorized("Missing or malformed Authorization header"))
        .map_err(IntoResponse::into_response)?;

    let claims = state
        .config
        .token_service()
        .verify(token)
        .map_err(|_| AppError::unauthorized("Invalid or expired token").into_response())?;

    let user_id = UserId::parse(&claims.sub)
        .map_err(|_| AppError::unauthorized("Invalid token subject").into_response())?;

    let role = UserRole::from_code(&claims.role)
        .ok_or_else(|| AppError::unauthorized("Invalid token role").into_response())?;

    req.extensions_mut().insert(AuthUser { user_id, role });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
