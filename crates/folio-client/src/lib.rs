//! # folio-client
//!
//! HTTP access to the portfolio backend: the [`ApiClient`] (bearer
//! injection, token refresh with a single replay, retry of transient
//! failures) and one typed service per backend resource.

pub mod client;
pub mod endpoints;
pub mod services;

pub use client::{ApiClient, AuthEvent};
pub use services::Services;
