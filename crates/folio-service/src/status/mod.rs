//! Live status ("presence"): pure lifecycle helpers, the admin panel
//! manager, and the public badge poller.

pub mod lifecycle;
pub mod manager;
pub mod poller;

pub use manager::{StatusManager, StatusPanel};
pub use poller::{DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL, StatusPoller, StatusView};
