//! Clients Error Types
//!
//! This module provides clients-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Clients-specific result type alias
pub type ClientsResult<T> = Result<T, ClientsError>;

/// Clients-specific error variants
#[derive(Debug, Error)]
pub enum ClientsError {
    /// Profile does not exist, or belongs to another user. The two cases
    /// are deliberately indistinguishable on reads.
    #[error("Profile not found")]
    ProfileNotFound,

    /// Form does not exist (malformed ids included)
    #[error("Form not found")]
    FormNotFound,

    /// Write against a profile managed by someone else
    #[error("You do not manage this profile")]
    NotProfileOwner,

    /// Operation restricted to administrators
    #[error("Administrator privileges required")]
    AdminOnly,

    /// A form with this version already exists
    #[error("A form with this version already exists")]
    DuplicateVersion,

    /// Malformed or missing input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Submission payload unfit for report generation
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClientsError::ProfileNotFound | ClientsError::FormNotFound => StatusCode::NOT_FOUND,
            ClientsError::NotProfileOwner | ClientsError::AdminOnly => StatusCode::FORBIDDEN,
            ClientsError::DuplicateVersion => StatusCode::CONFLICT,
            ClientsError::Validation(_) | ClientsError::InvalidSubmission(_) => {
                StatusCode::BAD_REQUEST
            }
            ClientsError::Database(_) | ClientsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientsError::ProfileNotFound | ClientsError::FormNotFound => ErrorKind::NotFound,
            ClientsError::NotProfileOwner | ClientsError::AdminOnly => ErrorKind::Forbidden,
            ClientsError::DuplicateVersion => ErrorKind::Conflict,
            ClientsError::Validation(_) | ClientsError::InvalidSubmission(_) => {
                ErrorKind::BadRequest
            }
            ClientsError::Database(_) | ClientsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ClientsError::Database(e) => {
                tracing::error!(error = %e, "Clients database error");
            }
            ClientsError::Internal(msg) => {
                tracing::error!(message = %msg, "Clients internal error");
            }
            ClientsError::NotProfileOwner | ClientsError::AdminOnly => {
                tracing::warn!(error = %self, "Authorization denied");
            }
            _ => {
                tracing::debug!(error = %self, "Clients error");
            }
        }
    }
}

impl IntoResponse for ClientsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ClientsError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => ClientsError::Validation(err.message().to_string()),
            _ => ClientsError::Internal(err.to_string()),
        }
    }
}
