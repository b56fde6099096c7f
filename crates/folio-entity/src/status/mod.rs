//! Live status ("presence") records and the predefined status catalog.

pub mod category;
pub mod clear_after;
pub mod model;
pub mod predefined;

pub use category::StatusCategory;
pub use clear_after::ClearAfter;
pub use model::{CreateStatusRequest, PublicStatus, UpdateStatusRequest, UserStatus};
pub use predefined::{AWAY_STATUS_IDS, BUSY_STATUS_IDS, DEFAULT_EMOJI, PREDEFINED_STATUSES, PredefinedStatus};
