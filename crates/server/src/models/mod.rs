//! Domain models for the Rateboard service.

pub mod owner_request;
pub mod rating;
pub mod store;
pub mod user;

pub use owner_request::OwnerRequest;
pub use rating::{OwnerAggregate, Rating, StoreAggregate, StoreRater};
pub use store::Store;
pub use user::User;
