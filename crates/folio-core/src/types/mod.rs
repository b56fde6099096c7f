//! Core type definitions used across the Folio workspace.

pub mod pagination;
pub mod query;
pub mod sorting;

pub use pagination::Paged;
pub use query::QueryParams;
pub use sorting::SortDirection;
