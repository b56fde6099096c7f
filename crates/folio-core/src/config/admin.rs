//! Admin list management configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the admin resource managers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Quiet period after the last filter change before a list refetch.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl AdminConfig {
    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}
