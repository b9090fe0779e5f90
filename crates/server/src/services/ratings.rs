//! Rating ledger: upsert semantics and derived aggregates.

use sqlx::SqlitePool;

use rateboard_core::{RatingValue, Role, StoreId, UserId};

use crate::auth::Identity;
use crate::db::ratings::RatingRepository;
use crate::db::stores::StoreRepository;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::{OwnerAggregate, Rating, StoreAggregate, StoreRater};

/// Result of a rating submission.
#[derive(Debug, Clone)]
pub struct RatingOutcome {
    pub rating: Rating,
    /// `true` if a new row was created, `false` if an existing rating was
    /// overwritten.
    pub created: bool,
}

/// Rating ledger service.
pub struct RatingService<'a> {
    ratings: RatingRepository<'a>,
    stores: StoreRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> RatingService<'a> {
    /// Create a new rating service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            ratings: RatingRepository::new(pool),
            stores: StoreRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// Submit or overwrite the caller's rating for a store.
    ///
    /// Resubmitting the same value is still a genuine write: `updated_at`
    /// moves forward. Aggregates are recomputed on read, so the write is
    /// visible to the very next aggregate query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `value` is outside `1..=5`
    /// (nothing is written in that case).
    /// Returns `AppError::NotFound` if the store does not exist.
    pub async fn submit(
        &self,
        identity: &Identity,
        store_id: StoreId,
        value: i64,
    ) -> Result<RatingOutcome, AppError> {
        let value = RatingValue::new(value).map_err(|e| AppError::Validation(e.to_string()))?;

        self.stores
            .get_by_id(store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("store {store_id} not found")))?;

        let (rating, created) = self
            .ratings
            .upsert(identity.user_id, store_id, value)
            .await?;

        tracing::info!(
            user_id = %identity.user_id,
            store_id = %store_id,
            value = %value,
            created,
            "rating submitted"
        );

        Ok(RatingOutcome { rating, created })
    }

    /// Live average and count for one store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the store does not exist.
    pub async fn store_aggregate(&self, store_id: StoreId) -> Result<StoreAggregate, AppError> {
        self.stores
            .get_by_id(store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("store {store_id} not found")))?;

        let (avg_rating, rating_count) = self.ratings.store_aggregate(store_id).await?;

        Ok(StoreAggregate {
            store_id,
            avg_rating,
            rating_count,
        })
    }

    /// Live average across all stores owned by `owner_id`.
    ///
    /// Admins may query any owner; everyone else only themselves.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for non-admin callers querying
    /// another user. Returns `AppError::NotFound` if the user does not
    /// exist.
    pub async fn owner_aggregate(
        &self,
        identity: &Identity,
        owner_id: UserId,
    ) -> Result<OwnerAggregate, AppError> {
        if !identity.is_admin() && identity.user_id != owner_id {
            return Err(AppError::Forbidden(
                "not permitted to read another owner's aggregate".to_owned(),
            ));
        }

        self.users
            .get_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {owner_id} not found")))?;

        let avg_rating = self.ratings.owner_aggregate(owner_id).await?;

        Ok(OwnerAggregate {
            owner_id,
            avg_rating,
        })
    }

    /// List who rated a store.
    ///
    /// Admins may read any store; owners only stores they own. An owner
    /// querying a store it does not own gets `Forbidden` whether the
    /// store exists or not, so this read cannot be used to probe for
    /// store existence. Only admins see `NotFound` for a missing store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` if the caller may not read the store.
    /// Returns `AppError::NotFound` for an admin querying a missing store.
    pub async fn store_raters(
        &self,
        identity: &Identity,
        store_id: StoreId,
    ) -> Result<Vec<StoreRater>, AppError> {
        identity.require_role(&[Role::Admin, Role::Owner])?;

        match self.stores.get_by_id(store_id).await? {
            Some(store) => {
                identity.require_store_access(&store)?;
                Ok(self.ratings.raters(store_id).await?)
            }
            None if identity.is_admin() => {
                Err(AppError::NotFound(format!("store {store_id} not found")))
            }
            None => Err(AppError::Forbidden(format!(
                "not permitted to read rater detail for store {store_id}"
            ))),
        }
    }
}
