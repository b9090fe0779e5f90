//! Database operations for the Rateboard `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Platform identities with a closed role column
//! - `stores` - Stores owned by `owner`-role users
//! - `ratings` - One row per (user, store) pair, enforced by a unique index
//! - `owner_requests` - One lifetime upgrade request per user, enforced by a unique index
//!
//! The unique indexes are the authoritative enforcement of the platform's
//! two core invariants; repositories translate violations into
//! [`RepositoryError::Conflict`] instead of leaking raw storage errors.
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` and run on
//! startup via [`MIGRATOR`].

pub mod owner_requests;
pub mod ratings;
pub mod stores;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate rating or request).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing; foreign keys are enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
