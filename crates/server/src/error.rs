//! Unified error handling.
//!
//! Provides a unified `AppError` type covering the whole error taxonomy.
//! All route handlers return `Result<T, AppError>`; every error is
//! recovered at the operation boundary and turned into a response - none
//! is fatal to the process, and raw storage errors are never exposed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::db::RepositoryError;

/// Application-level error type for the platform service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, expired, or invalid credential.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Authenticated, but role or ownership does not permit the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed input (e.g. rating value out of range).
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness violation surfaced as a domain error.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// State-machine guard failure: the request has already been decided.
    #[error("request is not pending")]
    NotPending,

    /// Storage failure that has no domain translation.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential | AuthError::InvalidCredential => Self::Unauthenticated,
            AuthError::Forbidden(msg) => Self::Forbidden(msg),
            AuthError::Signing(e) => Self::Internal(format!("credential signing failed: {e}")),
        }
    }
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Repository(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) | Self::NotPending => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Repository(_) | Self::Internal(_) => "internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
