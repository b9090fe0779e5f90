//! Owner-upgrade request workflow.
//!
//! State machine: a `normal` user creates a `pending` request; an admin
//! moves it to `approved` (which flips the requester's role) or
//! `rejected` (which stores a reason). Both outcomes are terminal, and a
//! rejected user cannot re-request - the unique index on `user_id` keeps
//! that dead-end closed on purpose.

use serde::Deserialize;
use sqlx::SqlitePool;

use rateboard_core::{RequestId, RequestStatus, Role};

use crate::auth::Identity;
use crate::db::RepositoryError;
use crate::db::owner_requests::OwnerRequestRepository;
use crate::error::AppError;
use crate::models::OwnerRequest;

/// Reason stored when an admin rejects without giving one.
const DEFAULT_REJECTION_REASON: &str = "rejected by administrator";

/// Admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// Owner-request workflow service.
pub struct OwnerRequestService<'a> {
    requests: OwnerRequestRepository<'a>,
}

impl<'a> OwnerRequestService<'a> {
    /// Create a new owner-request service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            requests: OwnerRequestRepository::new(pool),
        }
    }

    /// File an upgrade request for the caller.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller's role is `normal`.
    /// Returns `AppError::Conflict` if any request record already exists
    /// for this user (pending, approved, or rejected) - state is left
    /// unchanged.
    pub async fn request(&self, identity: &Identity) -> Result<OwnerRequest, AppError> {
        identity.require_role(&[Role::Normal])?;

        let request = self
            .requests
            .create(identity.user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(msg) => AppError::Conflict(msg),
                other => AppError::Repository(other),
            })?;

        tracing::info!(
            user_id = %identity.user_id,
            request_id = %request.id,
            "owner upgrade requested"
        );

        Ok(request)
    }

    /// Approve or reject a pending request.
    ///
    /// Approval flips the requester's role to `owner` atomically with the
    /// status change. Rejection persists the given reason, or a non-empty
    /// default when omitted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller is an admin.
    /// Returns `AppError::NotFound` if no request has this ID.
    /// Returns `AppError::NotPending` if the request was already decided.
    pub async fn decide(
        &self,
        identity: &Identity,
        request_id: RequestId,
        decision: Decision,
        reason: Option<String>,
    ) -> Result<OwnerRequest, AppError> {
        identity.require_role(&[Role::Admin])?;

        let (status, reason) = match decision {
            Decision::Approve => (RequestStatus::Approved, None),
            Decision::Reject => {
                let reason = reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_owned());
                (RequestStatus::Rejected, Some(reason))
            }
        };

        let decided = self
            .requests
            .decide(request_id, status, reason.as_deref())
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    AppError::NotFound(format!("owner request {request_id} not found"))
                }
                other => AppError::Repository(other),
            })?;

        let request = decided.ok_or(AppError::NotPending)?;

        tracing::info!(
            request_id = %request.id,
            user_id = %request.user_id,
            status = %request.status,
            decided_by = %identity.user_id,
            "owner request decided"
        );

        Ok(request)
    }

    /// Pending requests, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` unless the caller is an admin.
    pub async fn pending(&self, identity: &Identity) -> Result<Vec<OwnerRequest>, AppError> {
        identity.require_role(&[Role::Admin])?;
        Ok(self.requests.pending().await?)
    }
}
