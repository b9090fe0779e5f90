//! Platform-wide dashboard counts.
//!
//! Counts are computed live from current state on every call; nothing is
//! cached, so a write is visible to the very next read.

use serde::Serialize;
use sqlx::SqlitePool;

use rateboard_core::Role;

use crate::auth::Identity;
use crate::db::ratings::RatingRepository;
use crate::db::stores::StoreRepository;
use crate::db::users::UserRepository;
use crate::error::AppError;

/// Platform-wide totals.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub stores: i64,
    pub ratings: i64,
}

/// Dashboard query service.
pub struct DashboardService<'a> {
    users: UserRepository<'a>,
    stores: StoreRepository<'a>,
    ratings: RatingRepository<'a>,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            stores: StoreRepository::new(pool),
            ratings: RatingRepository::new(pool),
        }
    }

    /// Current platform counts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller is an admin.
    pub async fn counts(&self, identity: &Identity) -> Result<DashboardCounts, AppError> {
        identity.require_role(&[Role::Admin])?;

        Ok(DashboardCounts {
            users: self.users.count().await?,
            stores: self.stores.count().await?,
            ratings: self.ratings.count().await?,
        })
    }
}
