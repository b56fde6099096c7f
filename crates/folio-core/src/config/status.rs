//! Live status configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the status poller and the admin status manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Seconds between public status refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Number of history entries requested by default.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl StatusConfig {
    /// Poll interval as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: default_refresh_interval(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_history_limit() -> u32 {
    10
}
