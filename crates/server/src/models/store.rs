//! Store model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rateboard_core::{StoreId, UserId};

/// A store that users can rate.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}
