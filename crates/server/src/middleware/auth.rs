//! Authentication extractor for route handlers.
//!
//! Resolves the caller identity from a bearer credential. Missing,
//! malformed, expired, and tampered credentials all reject with the same
//! 401 response.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::{AuthError, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingCredential)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingCredential)?;

        let identity = state.tokens().verify(token)?;

        Ok(Self(identity))
    }
}
