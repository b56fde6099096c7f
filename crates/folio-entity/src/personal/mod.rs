//! Owner profile records.

pub mod model;

pub use model::{PersonalInfo, PersonalInfoUpdate, SocialLink};
