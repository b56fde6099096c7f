//! Core traits defined in `folio-core` and implemented by other crates.

pub mod session_store;

pub use session_store::{SessionStore, StorageScope, keys};
