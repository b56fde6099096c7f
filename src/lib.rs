//! # folio
//!
//! Public portfolio site: renders the profile, skills, projects and live
//! status from the backend API.

pub mod site;
