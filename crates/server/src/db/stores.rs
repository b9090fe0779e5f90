//! Store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use rateboard_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new store owned by `owner_id`.
    ///
    /// The caller is responsible for checking that the owner exists and
    /// holds the owner role; the foreign key only guards referential
    /// integrity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str, owner_id: UserId) -> Result<Store, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO stores (name, owner_id, created_at) \
             VALUES (?1, ?2, ?3) \
             RETURNING id, name, owner_id, created_at",
        )
        .bind(name)
        .bind(owner_id.as_i64())
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        map_store_row(&row)
    }

    /// Get a store by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, owner_id, created_at FROM stores WHERE id = ?1")
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(map_store_row).transpose()
    }

    /// Count all stores on the platform.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM stores")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn map_store_row(row: &SqliteRow) -> Result<Store, RepositoryError> {
    Ok(Store {
        id: StoreId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        owner_id: UserId::new(row.try_get("owner_id")?),
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}
