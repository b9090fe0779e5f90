//! Role and ownership predicates.
//!
//! The gate resolves nothing and mutates nothing: it only checks a
//! verified [`Identity`] against the roles an operation allows, or
//! against a store's owner.

use rateboard_core::{Role, UserId};

use super::error::AuthError;
use crate::models::Store;

/// A verified caller identity, resolved from a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    /// Check that the caller's role is in the operation's allowed set.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the role is not allowed.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AuthError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        Err(AuthError::Forbidden(format!(
            "role {} is not permitted to perform this operation",
            self.role
        )))
    }

    /// Check that the caller may read rater detail for `store`.
    ///
    /// Admins may read any store; an owner only their own. The existence
    /// of someone else's store is not hidden - the denial is `Forbidden`,
    /// never a not-found.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin callers that do not
    /// own the store.
    pub fn require_store_access(&self, store: &Store) -> Result<(), AuthError> {
        if self.role == Role::Admin {
            return Ok(());
        }
        if self.role == Role::Owner && store.owner_id == self.user_id {
            return Ok(());
        }
        Err(AuthError::Forbidden(format!(
            "not permitted to read rater detail for store {}",
            store.id
        )))
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rateboard_core::StoreId;

    fn identity(id: i64, role: Role) -> Identity {
        Identity {
            user_id: UserId::new(id),
            role,
        }
    }

    fn store(owner: i64) -> Store {
        Store {
            id: StoreId::new(1),
            name: "Corner Shop".to_owned(),
            owner_id: UserId::new(owner),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_role() {
        assert!(identity(1, Role::Admin).require_role(&[Role::Admin]).is_ok());
        assert!(
            identity(1, Role::Normal)
                .require_role(&[Role::Admin])
                .is_err()
        );
        assert!(
            identity(1, Role::Owner)
                .require_role(&[Role::Normal, Role::Owner])
                .is_ok()
        );
    }

    #[test]
    fn test_store_access_admin_any() {
        assert!(
            identity(99, Role::Admin)
                .require_store_access(&store(5))
                .is_ok()
        );
    }

    #[test]
    fn test_store_access_owner_own_only() {
        assert!(
            identity(5, Role::Owner)
                .require_store_access(&store(5))
                .is_ok()
        );
        let err = identity(6, Role::Owner)
            .require_store_access(&store(5))
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(_)));
    }

    #[test]
    fn test_store_access_normal_denied() {
        assert!(
            identity(5, Role::Normal)
                .require_store_access(&store(5))
                .is_err()
        );
    }
}
