//! Role and workflow-status enumerations.
//!
//! Both enums are closed: invalid role or status strings cannot be
//! represented once parsed at the storage boundary.

use serde::{Deserialize, Serialize};

/// Platform role with different permission levels.
///
/// A role is mutated only by the owner-upgrade workflow (normal -> owner)
/// or by administrative user creation; it is never self-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access including user/store creation and request triage.
    Admin,
    /// Regular user: may rate stores and request an owner upgrade.
    Normal,
    /// Store owner: may read rater detail for their own stores.
    Owner,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Normal => write!(f, "normal"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "normal" => Ok(Self::Normal),
            "owner" => Ok(Self::Owner),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Owner-upgrade request status.
///
/// `Approved` and `Rejected` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Whether any further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid request status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Admin, Role::Normal, Role::Owner] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(
                RequestStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }
}
