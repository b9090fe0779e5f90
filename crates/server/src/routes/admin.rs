//! Administrative routes: dashboard and user/store creation.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use rateboard_core::{Role, UserId};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{Store, User};
use crate::services::{AdminService, DashboardCounts, DashboardService};
use crate::state::AppState;

/// Request to create a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Request to create a store.
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub owner_id: i64,
}

/// Platform counts, computed live.
///
/// GET /api/dashboard
///
/// # Errors
///
/// Returns `AppError::Forbidden` for non-admin callers.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<DashboardCounts>, AppError> {
    let counts = DashboardService::new(state.pool())
        .counts(&identity)
        .await?;
    Ok(Json(counts))
}

/// Create a user with an explicit role.
///
/// POST /api/users
///
/// # Errors
///
/// Returns `AppError::Conflict` if the email is already registered.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AdminService::new(state.pool())
        .create_user(&identity, &req.name, &req.email, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create a store owned by an existing owner.
///
/// POST /api/stores
///
/// # Errors
///
/// Returns `AppError::Validation` if the owner is missing or not an owner.
pub async fn create_store(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Json(req): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<Store>), AppError> {
    let store = AdminService::new(state.pool())
        .create_store(&identity, &req.name, UserId::new(req.owner_id))
        .await?;
    Ok((StatusCode::CREATED, Json(store)))
}
