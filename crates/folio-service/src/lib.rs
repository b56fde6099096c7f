//! # folio-service
//!
//! State layer for the Folio admin console and public site. Sits on top of
//! the typed services in `folio-client` and turns requests into observable
//! state:
//!
//! - [`fetch`]: a generic `{data, loading, error}` handle around one async call
//! - [`manage`]: debounced, filterable list managers per resource
//! - [`status`]: presence lifecycle helpers, the admin status manager, and
//!   the public status poller
//! - [`validation`]: client-side form checks

pub mod contact;
pub mod fetch;
pub mod manage;
pub mod projects;
pub mod skills;
pub mod status;
pub mod validation;

pub use fetch::{FetchHandle, FetchState};
pub use manage::{Identifiable, ListFetcher, ManagerState, ResourceManager};
