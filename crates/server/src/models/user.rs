//! User model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rateboard_core::{Role, UserId};

/// A platform identity.
///
/// The role field is mutated only by the owner-upgrade workflow
/// (approve flips normal -> owner) and by administrative creation.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
