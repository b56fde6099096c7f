//! Authenticated user records.

pub mod model;
pub mod role;

pub use model::{AuthSession, TokenPair, User};
pub use role::UserRole;
