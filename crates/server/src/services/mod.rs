//! Domain services.
//!
//! Each service composes the repositories it needs, applies the access
//! gate, and translates repository errors into the domain taxonomy at
//! its edge.

pub mod admin;
pub mod dashboard;
pub mod owner_requests;
pub mod ratings;

pub use admin::AdminService;
pub use dashboard::{DashboardCounts, DashboardService};
pub use owner_requests::{Decision, OwnerRequestService};
pub use ratings::{RatingOutcome, RatingService};
