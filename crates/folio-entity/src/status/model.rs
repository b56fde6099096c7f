//! Status records exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clear_after::ClearAfter;

/// A broadcast presence entry, as the admin sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub id: String,
    pub emoji: String,
    pub message: String,
    pub is_active: bool,
    /// Catalog id when the status was picked from the predefined list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_status_id: Option<String>,
    /// Absent means the status never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only projection of the current status for anonymous visitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    pub emoji: String,
    pub message: String,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

/// Body of `POST /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatusRequest {
    pub emoji: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_status_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_after: Option<ClearAfter>,
}

/// Body of `PUT /status/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_status_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_after: Option<ClearAfter>,
}
