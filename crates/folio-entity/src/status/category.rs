//! Display category of a status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category that drives the status badge styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    /// Do not disturb.
    Busy,
    /// Away from keyboard.
    Away,
    /// Anything else.
    #[default]
    Online,
}

impl StatusCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Busy => "busy",
            Self::Away => "away",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
