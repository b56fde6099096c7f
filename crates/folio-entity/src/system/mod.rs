//! Health check and diagnostic payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

/// Template used by the test email endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestEmailKind {
    Verification,
    Reset,
    Contact,
}

impl TestEmailKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Reset => "reset",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for TestEmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestEmailKind {
    type Err = folio_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verification" => Ok(Self::Verification),
            "reset" => Ok(Self::Reset),
            "contact" => Ok(Self::Contact),
            _ => Err(folio_core::AppError::validation(format!(
                "Invalid email type: '{s}'. Expected one of: verification, reset, contact"
            ))),
        }
    }
}

/// Body of `POST /test/email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEmailRequest {
    pub email: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TestEmailKind>,
}

/// Response of `POST /test/email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEmailResponse {
    pub message: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Generic `{message}` acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
