//! # folio-auth
//!
//! Client-side authentication plumbing for Folio.
//!
//! ## Modules
//!
//! - `store` — [`SessionStore`](folio_core::traits::SessionStore) backends (in-memory and file-backed)
//! - `callback` — OAuth callback parsing and session persistence
//! - `login` — backend and direct Google login URLs
//! - `session_id` — per-process session identifier

pub mod callback;
pub mod login;
pub mod session_id;
pub mod store;

pub use callback::{CallbackOutcome, CallbackParams, handle_callback};
pub use login::{backend_login_url, google_oauth_url};
pub use store::{FileSessionStore, MemorySessionStore};
