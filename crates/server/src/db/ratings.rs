//! Rating repository: atomic upsert and derived aggregates.
//!
//! The `UNIQUE (user_id, store_id)` index is the authoritative guard for
//! the one-rating-per-user-per-store invariant. The upsert inserts first
//! and switches to a conditional update only when the index rejects the
//! insert, so two concurrent submissions can never produce two rows.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use rateboard_core::{RatingId, RatingValue, StoreId, UserId};

use super::RepositoryError;
use crate::models::{Rating, StoreRater};

/// Repository for rating database operations.
pub struct RatingRepository<'a> {
    pool: &'a SqlitePool,
}

const RATING_COLUMNS: &str = "id, user_id, store_id, value, created_at, updated_at";

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the rating for (`user_id`, `store_id`).
    ///
    /// Returns the stored rating and `true` if a new row was created,
    /// `false` if an existing row was overwritten. An overwrite always
    /// bumps `updated_at`, even when the value is unchanged; `created_at`
    /// is never touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either write fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        store_id: StoreId,
        value: RatingValue,
    ) -> Result<(Rating, bool), RepositoryError> {
        let now = Utc::now();

        let inserted = sqlx::query(&format!(
            "INSERT INTO ratings (user_id, store_id, value, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING {RATING_COLUMNS}"
        ))
        .bind(user_id.as_i64())
        .bind(store_id.as_i64())
        .bind(value.get())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await;

        match inserted {
            Ok(row) => Ok((map_rating_row(&row)?, true)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // A row already exists for this pair; overwrite it. Ratings
                // are never deleted, so the row is guaranteed to be there.
                let row = sqlx::query(&format!(
                    "UPDATE ratings SET value = ?3, updated_at = ?4 \
                     WHERE user_id = ?1 AND store_id = ?2 \
                     RETURNING {RATING_COLUMNS}"
                ))
                .bind(user_id.as_i64())
                .bind(store_id.as_i64())
                .bind(value.get())
                .bind(now)
                .fetch_optional(self.pool)
                .await?
                .ok_or(RepositoryError::NotFound)?;

                Ok((map_rating_row(&row)?, false))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Compute the live average and count for one store.
    ///
    /// Returns `(0.0, 0)` for a store with no ratings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn store_aggregate(&self, store_id: StoreId) -> Result<(f64, i64), RepositoryError> {
        let row = sqlx::query(
            "SELECT CAST(COALESCE(AVG(value), 0) AS REAL) AS avg_rating, \
                    COUNT(*) AS rating_count \
             FROM ratings WHERE store_id = ?1",
        )
        .bind(store_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok((row.try_get("avg_rating")?, row.try_get("rating_count")?))
    }

    /// Compute the live average across all stores owned by `owner_id`.
    ///
    /// Returns 0.0 when the owner has no rated stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn owner_aggregate(&self, owner_id: UserId) -> Result<f64, RepositoryError> {
        let row = sqlx::query(
            "SELECT CAST(COALESCE(AVG(r.value), 0) AS REAL) AS avg_rating \
             FROM ratings r \
             JOIN stores s ON s.id = r.store_id \
             WHERE s.owner_id = ?1",
        )
        .bind(owner_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(row.try_get("avg_rating")?)
    }

    /// List who rated a store, most recent write first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is out of range.
    pub async fn raters(&self, store_id: StoreId) -> Result<Vec<StoreRater>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT r.user_id, u.name, u.email, r.value, r.updated_at \
             FROM ratings r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.store_id = ?1 \
             ORDER BY r.updated_at DESC",
        )
        .bind(store_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let mut raters = Vec::with_capacity(rows.len());
        for row in &rows {
            raters.push(StoreRater {
                user_id: UserId::new(row.try_get("user_id")?),
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                value: parse_value(row.try_get("value")?)?,
                rated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
            });
        }

        Ok(raters)
    }

    /// Count all ratings on the platform.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM ratings")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn map_rating_row(row: &SqliteRow) -> Result<Rating, RepositoryError> {
    Ok(Rating {
        id: RatingId::new(row.try_get("id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        store_id: StoreId::new(row.try_get("store_id")?),
        value: parse_value(row.try_get("value")?)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Stored values are CHECK-constrained to `1..=5`; anything else is corruption.
fn parse_value(raw: i64) -> Result<RatingValue, RepositoryError> {
    RatingValue::new(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid rating in database: {e}")))
}
