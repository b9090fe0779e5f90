//! Rating model and derived aggregates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rateboard_core::{RatingId, RatingValue, StoreId, UserId};

/// A single user's rating of a single store.
///
/// At most one row exists per (`user_id`, `store_id`) pair. `created_at`
/// is immutable once set; `updated_at` moves forward on every write,
/// including a resubmission of the same value.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub store_id: StoreId,
    pub value: RatingValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived per-store statistics, recomputed on demand.
///
/// Never stored authoritatively; a store with no ratings reports an
/// average of 0.0 (not null) and a count of 0.
#[derive(Debug, Clone, Serialize)]
pub struct StoreAggregate {
    pub store_id: StoreId,
    pub avg_rating: f64,
    pub rating_count: i64,
}

/// Derived per-owner statistics across all stores owned by a user.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerAggregate {
    pub owner_id: UserId,
    pub avg_rating: f64,
}

/// One entry in a store's rater listing (owner/admin view).
#[derive(Debug, Clone, Serialize)]
pub struct StoreRater {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub value: RatingValue,
    pub rated_at: DateTime<Utc>,
}
