//! Core types for Rateboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod rating;
pub mod role;

pub use id::*;
pub use rating::{RatingValue, RatingValueError};
pub use role::{RequestStatus, Role};
