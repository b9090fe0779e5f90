//! HTTP route handlers for the platform service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                           - Liveness check (public)
//!
//! # Ratings
//! POST /api/ratings                      - Submit/overwrite a rating (any authenticated)
//! GET  /api/stores/{id}/aggregate        - Store average + count (any authenticated)
//! GET  /api/stores/{id}/raters           - Rater detail (admin, or the owning owner)
//! GET  /api/owners/{id}/aggregate        - Owner average (admin, or self)
//!
//! # Owner-upgrade workflow
//! POST /api/owner-requests               - Request upgrade (normal)
//! GET  /api/owner-requests/pending       - Triage queue, oldest first (admin)
//! POST /api/owner-requests/{id}/decision - Approve/reject (admin)
//!
//! # Administration
//! GET  /api/dashboard                    - Platform counts (admin)
//! POST /api/users                        - Create user (admin)
//! POST /api/stores                       - Create store (admin)
//! ```

pub mod admin;
pub mod owner_requests;
pub mod ratings;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ratings", post(ratings::submit))
        .route("/api/stores/{id}/aggregate", get(ratings::store_aggregate))
        .route("/api/stores/{id}/raters", get(ratings::store_raters))
        .route("/api/owners/{id}/aggregate", get(ratings::owner_aggregate))
        .route("/api/owner-requests", post(owner_requests::create))
        .route("/api/owner-requests/pending", get(owner_requests::pending))
        .route(
            "/api/owner-requests/{id}/decision",
            post(owner_requests::decide),
        )
        .route("/api/dashboard", get(admin::dashboard))
        .route("/api/users", post(admin::create_user))
        .route("/api/stores", post(admin::create_store))
        .with_state(state)
}

/// Liveness check.
async fn health() -> StatusCode {
    StatusCode::OK
}
