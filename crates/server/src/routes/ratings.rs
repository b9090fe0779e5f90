//! Rating and aggregate routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rateboard_core::{RatingId, StoreId, UserId};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{OwnerAggregate, StoreAggregate, StoreRater};
use crate::services::RatingService;
use crate::state::AppState;

/// Request to submit or overwrite a rating.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub store_id: i64,
    /// Raw value; range-checked by the service so an out-of-range value
    /// maps to 400 rather than a body-rejection.
    pub value: i64,
}

/// Response for a submitted rating.
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub id: RatingId,
    pub user_id: UserId,
    pub store_id: StoreId,
    pub value: i64,
    /// Whether this submission created a new rating or overwrote one.
    pub created: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submit or overwrite the caller's rating for a store.
///
/// POST /api/ratings
///
/// # Errors
///
/// Returns `AppError::Validation` for a value outside 1..=5 and
/// `AppError::NotFound` for a missing store.
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Json(req): Json<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<RatingResponse>), AppError> {
    let outcome = RatingService::new(state.pool())
        .submit(&identity, StoreId::new(req.store_id), req.value)
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let rating = outcome.rating;
    Ok((
        status,
        Json(RatingResponse {
            id: rating.id,
            user_id: rating.user_id,
            store_id: rating.store_id,
            value: rating.value.get(),
            created: outcome.created,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }),
    ))
}

/// Live average and count for a store.
///
/// GET /api/stores/{id}/aggregate
///
/// # Errors
///
/// Returns `AppError::NotFound` for a missing store.
pub async fn store_aggregate(
    State(state): State<AppState>,
    RequireAuth(_identity): RequireAuth,
    Path(store_id): Path<i64>,
) -> Result<Json<StoreAggregate>, AppError> {
    let aggregate = RatingService::new(state.pool())
        .store_aggregate(StoreId::new(store_id))
        .await?;
    Ok(Json(aggregate))
}

/// Rater detail for a store (admin, or the owning owner).
///
/// GET /api/stores/{id}/raters
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the caller may not read this store.
pub async fn store_raters(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(store_id): Path<i64>,
) -> Result<Json<Vec<StoreRater>>, AppError> {
    let raters = RatingService::new(state.pool())
        .store_raters(&identity, StoreId::new(store_id))
        .await?;
    Ok(Json(raters))
}

/// Live average across an owner's stores (admin, or self).
///
/// GET /api/owners/{id}/aggregate
///
/// # Errors
///
/// Returns `AppError::Forbidden` for non-admins querying another user.
pub async fn owner_aggregate(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(owner_id): Path<i64>,
) -> Result<Json<OwnerAggregate>, AppError> {
    let aggregate = RatingService::new(state.pool())
        .owner_aggregate(&identity, UserId::new(owner_id))
        .await?;
    Ok(Json(aggregate))
}
