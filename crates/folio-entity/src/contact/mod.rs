//! Contact form submissions.

pub mod model;
pub mod status;

pub use model::{Contact, ContactStats, ContactSubmission, ContactUpdate, ContactsPage};
pub use status::ContactStatus;
