//! HTTP front end of the public portfolio.

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod state;

pub use error::SiteError;
pub use router::build_router;
pub use state::SiteState;
