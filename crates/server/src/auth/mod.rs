//! Identity, credentials, and access control.
//!
//! Split in two layers:
//! - [`token`] - issues and verifies the signed, time-limited credential
//!   (stateless; independent of storage)
//! - [`gate`] - role and ownership predicates applied to a resolved
//!   [`Identity`] before any operation runs
//!
//! Known limitation, preserved deliberately: there is no revocation list.
//! A credential issued before a role change stays valid until its natural
//! expiry.

mod error;
pub mod gate;
pub mod token;

pub use error::AuthError;
pub use gate::Identity;
pub use token::TokenService;
