//! Authentication and authorization errors.

use thiserror::Error;

/// Errors from credential handling and access checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("missing credential")]
    MissingCredential,

    /// The credential failed verification. Expiry and bad signatures are
    /// deliberately collapsed into one variant so callers cannot probe
    /// which check failed.
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// Authenticated, but the role or ownership predicate failed.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Signing a new credential failed.
    #[error("failed to sign credential: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
