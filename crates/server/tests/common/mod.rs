//! Shared helpers for integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use rateboard_core::{Role, UserId};
use rateboard_server::auth::Identity;
use rateboard_server::db::stores::StoreRepository;
use rateboard_server::db::users::UserRepository;
use rateboard_server::db::MIGRATOR;
use rateboard_server::models::{Store, User};

/// Fresh in-memory database with the schema applied.
///
/// A single connection keeps the `:memory:` database alive and shared
/// for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, role: Role) -> User {
    UserRepository::new(pool)
        .create(name, email, role)
        .await
        .unwrap()
}

pub async fn seed_store(pool: &SqlitePool, name: &str, owner_id: UserId) -> Store {
    StoreRepository::new(pool).create(name, owner_id).await.unwrap()
}

pub fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        role: user.role,
    }
}
