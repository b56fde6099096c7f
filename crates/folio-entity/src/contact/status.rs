//! Contact message workflow status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactStatus {
    /// Not yet opened.
    Unread,
    /// Opened by the admin.
    Read,
    /// Answered.
    Replied,
    /// Filed away.
    Archived,
}

impl ContactStatus {
    /// Return the status as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "UNREAD",
            Self::Read => "READ",
            Self::Replied => "REPLIED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = folio_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UNREAD" => Ok(Self::Unread),
            "READ" => Ok(Self::Read),
            "REPLIED" => Ok(Self::Replied),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(folio_core::AppError::validation(format!(
                "Invalid contact status: '{s}'. Expected one of: unread, read, replied, archived"
            ))),
        }
    }
}
