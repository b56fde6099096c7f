//! Contact message entity and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::types::Paged;

use super::status::ContactStatus;

/// A message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Private admin notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Body of `PUT /contact/messages/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Aggregate inbox counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total: u64,
    pub unread: u64,
    pub read: u64,
    pub replied: u64,
    pub archived: u64,
    pub this_week: u64,
    pub this_month: u64,
}

/// Paged message list as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsPage {
    pub messages: Vec<Contact>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl From<ContactsPage> for Paged<Contact> {
    fn from(page: ContactsPage) -> Self {
        Self {
            items: page.messages,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_wire_names() {
        let stats: ContactStats = serde_json::from_value(serde_json::json!({
            "total": 9, "unread": 3, "read": 2, "replied": 3, "archived": 1,
            "thisWeek": 4, "thisMonth": 9
        }))
        .unwrap();
        assert_eq!(stats.this_week, 4);
        assert_eq!(stats.unread, 3);
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = ContactUpdate {
            status: Some(ContactStatus::Read),
            notes: None,
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            serde_json::json!({"status": "READ"})
        );
    }
}
