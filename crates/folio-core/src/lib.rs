//! # folio-core
//!
//! Core crate for Folio. Contains configuration schemas, the unified
//! error system, list query/pagination/sorting types, and the session
//! storage trait that the API client is constructed with.
//!
//! This crate has **no** internal dependencies on other Folio crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
