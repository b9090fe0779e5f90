//! Owner-request repository: unique-per-user creation and guarded decisions.
//!
//! The `UNIQUE (user_id)` index enforces the one-lifetime-request rule,
//! including the terminal dead-end after rejection. Decisions are a single
//! conditional update guarded on `status = 'pending'`; an approval flips
//! the requester's role inside the same transaction.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use rateboard_core::{RequestId, RequestStatus, Role, UserId};

use super::RepositoryError;
use crate::models::OwnerRequest;

/// Repository for owner-request database operations.
pub struct OwnerRequestRepository<'a> {
    pool: &'a SqlitePool,
}

const REQUEST_COLUMNS: &str = "id, user_id, status, reason, created_at, updated_at";

impl<'a> OwnerRequestRepository<'a> {
    /// Create a new owner-request repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a pending request for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any request record already
    /// exists for this user, whatever its status.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId) -> Result<OwnerRequest, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            "INSERT INTO owner_requests (user_id, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(user_id.as_i64())
        .bind(RequestStatus::Pending.to_string())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "an owner request already exists for this user".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        map_request_row(&row)
    }

    /// List pending requests, oldest first (fairness ordering for triage).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pending(&self) -> Result<Vec<OwnerRequest>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM owner_requests \
             WHERE status = ?1 ORDER BY created_at ASC"
        ))
        .bind(RequestStatus::Pending.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_request_row).collect()
    }

    /// Apply a terminal decision to a pending request.
    ///
    /// The update is guarded on `status = 'pending'`, so a decision can
    /// never overwrite another decision. On approval the requester's role
    /// is flipped to `owner` within the same transaction.
    ///
    /// Returns `Ok(None)` when the request exists but is no longer
    /// pending (the state-machine guard failed).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no request has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn decide(
        &self,
        id: RequestId,
        decision: RequestStatus,
        reason: Option<&str>,
    ) -> Result<Option<OwnerRequest>, RepositoryError> {
        debug_assert!(decision.is_terminal(), "decision must be terminal");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let updated = sqlx::query(
            "UPDATE owner_requests SET status = ?2, reason = ?3, updated_at = ?4 \
             WHERE id = ?1 AND status = ?5",
        )
        .bind(id.as_i64())
        .bind(decision.to_string())
        .bind(reason)
        .bind(now)
        .bind(RequestStatus::Pending.to_string())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let exists = sqlx::query("SELECT id FROM owner_requests WHERE id = ?1")
                .bind(id.as_i64())
                .fetch_optional(&mut *tx)
                .await?;
            return match exists {
                Some(_) => Ok(None),
                None => Err(RepositoryError::NotFound),
            };
        }

        if decision == RequestStatus::Approved {
            sqlx::query(
                "UPDATE users SET role = ?2, updated_at = ?3 \
                 WHERE id = (SELECT user_id FROM owner_requests WHERE id = ?1)",
            )
            .bind(id.as_i64())
            .bind(Role::Owner.to_string())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM owner_requests WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_one(&mut *tx)
        .await?;

        let request = map_request_row(&row)?;
        tx.commit().await?;

        Ok(Some(request))
    }
}

fn map_request_row(row: &SqliteRow) -> Result<OwnerRequest, RepositoryError> {
    let status_text: String = row.try_get("status")?;
    let status = status_text.parse::<RequestStatus>().map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid request status in database: {e}"))
    })?;

    Ok(OwnerRequest {
        id: RequestId::new(row.try_get("id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        status,
        reason: row.try_get::<Option<String>, _>("reason")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
