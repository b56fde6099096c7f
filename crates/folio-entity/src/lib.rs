//! # folio-entity
//!
//! Domain records for the portfolio backend API. Every struct in this
//! crate mirrors a JSON payload the backend sends or accepts. Wire names
//! are camelCase; enums use the backend's upper-case spelling.

pub mod contact;
pub mod personal;
pub mod project;
pub mod skill;
pub mod status;
pub mod system;
pub mod user;
