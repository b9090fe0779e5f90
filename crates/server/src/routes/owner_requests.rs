//! Owner-upgrade workflow routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use rateboard_core::RequestId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::OwnerRequest;
use crate::services::{Decision, OwnerRequestService};
use crate::state::AppState;

/// Request body for a decision on a pending owner request.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
    /// Only meaningful for rejections; a blank or missing reason is
    /// replaced by a non-empty default.
    pub reason: Option<String>,
}

/// File an owner-upgrade request for the caller.
///
/// POST /api/owner-requests
///
/// # Errors
///
/// Returns `AppError::Conflict` if the caller already has a request
/// record, whatever its status.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<(StatusCode, Json<OwnerRequest>), AppError> {
    let request = OwnerRequestService::new(state.pool())
        .request(&identity)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Pending requests, oldest first.
///
/// GET /api/owner-requests/pending
///
/// # Errors
///
/// Returns `AppError::Forbidden` for non-admin callers.
pub async fn pending(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<Vec<OwnerRequest>>, AppError> {
    let requests = OwnerRequestService::new(state.pool())
        .pending(&identity)
        .await?;
    Ok(Json(requests))
}

/// Approve or reject a pending request.
///
/// POST /api/owner-requests/{id}/decision
///
/// # Errors
///
/// Returns `AppError::NotPending` if the request was already decided.
pub async fn decide(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(request_id): Path<i64>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<OwnerRequest>, AppError> {
    let request = OwnerRequestService::new(state.pool())
        .decide(
            &identity,
            RequestId::new(request_id),
            req.decision,
            req.reason,
        )
        .await?;
    Ok(Json(request))
}
