//! Administrative creation of users and stores.
//!
//! These are the minimum write paths the core invariants need: the only
//! way besides workflow approval for a role to be set, and the only way
//! for a store (the target of ratings and ownership checks) to exist.

use sqlx::SqlitePool;

use rateboard_core::{Role, UserId};

use crate::auth::Identity;
use crate::db::RepositoryError;
use crate::db::stores::StoreRepository;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::{Store, User};

/// Administrative service.
pub struct AdminService<'a> {
    users: UserRepository<'a>,
    stores: StoreRepository<'a>,
}

impl<'a> AdminService<'a> {
    /// Create a new administrative service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            stores: StoreRepository::new(pool),
        }
    }

    /// Create a user with an explicit role.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller is an admin.
    /// Returns `AppError::Validation` for an empty name or malformed email.
    /// Returns `AppError::Conflict` if the email is already registered.
    pub async fn create_user(
        &self,
        identity: &Identity,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<User, AppError> {
        identity.require_role(&[Role::Admin])?;

        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation("invalid email address".to_owned()));
        }

        let user = self
            .users
            .create(name.trim(), email, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(msg) => AppError::Conflict(msg),
                other => AppError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "user created");

        Ok(user)
    }

    /// Create a store owned by an existing `owner`-role user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller is an admin.
    /// Returns `AppError::Validation` if the owner is missing or does not
    /// hold the owner role, or if the name is empty.
    pub async fn create_store(
        &self,
        identity: &Identity,
        name: &str,
        owner_id: UserId,
    ) -> Result<Store, AppError> {
        identity.require_role(&[Role::Admin])?;

        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }

        let owner = self.users.get_by_id(owner_id).await?;
        if !owner.is_some_and(|u| u.role == Role::Owner) {
            return Err(AppError::Validation(
                "store owner must be an existing user with the owner role".to_owned(),
            ));
        }

        let store = self.stores.create(name.trim(), owner_id).await?;

        tracing::info!(store_id = %store.id, owner_id = %owner_id, "store created");

        Ok(store)
    }
}
