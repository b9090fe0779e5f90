//! Owner-upgrade request model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rateboard_core::{RequestId, RequestStatus, UserId};

/// A request by a normal user to be promoted to store owner.
///
/// Each user has at most one lifetime request record (unique index on
/// `user_id`). `approved` and `rejected` are terminal; a rejected user
/// cannot re-request under the current model.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub status: RequestStatus,
    /// Set only when the request was rejected.
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
