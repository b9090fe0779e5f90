//! Signed, time-limited credentials.
//!
//! Credentials are opaque HS256 tokens carrying the user id and role.
//! Verification is stateless and side-effect-free; the validity window is
//! a configuration constant (default 8 hours).

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use rateboard_core::{Role, UserId};

use super::error::AuthError;
use super::gate::Identity;

/// Claims carried inside a credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    /// Role at issuance time. A later role change does not invalidate
    /// outstanding credentials (no revocation is modeled).
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies signed credentials.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the configured signing secret and TTL.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a credential for the given user and role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id.as_i64(),
            role,
            iat: now,
            exp: now.saturating_add(ttl_secs),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a credential and resolve the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` for every verification
    /// failure - expired and tampered tokens are indistinguishable to the
    /// caller.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "credential rejected");
            AuthError::InvalidCredential
        })?;

        Ok(Identity {
            user_id: UserId::new(data.claims.sub),
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "rateboard-test-signing-key-0123456789abcdef";

    fn test_service() -> TokenService {
        TokenService::new(
            &SecretString::from(TEST_SECRET),
            Duration::from_secs(8 * 3600),
        )
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let service = test_service();
        let token = service.issue(UserId::new(7), Role::Owner).unwrap();
        let identity = service.verify(&token).unwrap();
        assert_eq!(identity.user_id, UserId::new(7));
        assert_eq!(identity.role, Role::Owner);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let service = test_service();
        let other = TokenService::new(
            &SecretString::from("a-completely-different-signing-key!!"),
            Duration::from_secs(8 * 3600),
        );
        let token = other.issue(UserId::new(1), Role::Admin).unwrap();
        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn test_rejects_expired() {
        let service = test_service();

        // Craft a token whose expiry is well past the default leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: Role::Normal,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn test_rejects_garbage() {
        let service = test_service();
        assert!(matches!(
            service.verify("not-a-token").unwrap_err(),
            AuthError::InvalidCredential
        ));
    }
}
