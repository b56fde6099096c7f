//! Admin contact inbox: filters, fetcher and actions.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use folio_client::services::{ContactFilters, ContactService};
use folio_core::types::SortDirection;
use folio_core::{AppError, AppResult};
use folio_entity::contact::{Contact, ContactStats, ContactStatus, ContactUpdate};

use crate::manage::{ListFetcher, ResourceManager};

/// Page size of the inbox.
pub const INBOX_PAGE_SIZE: u32 = 50;

/// Column the inbox is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContactSortKey {
    #[default]
    CreatedAt,
    Name,
    Email,
    Status,
}

impl ContactSortKey {
    /// Return the key as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Name => "name",
            Self::Email => "email",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for ContactSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactSortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" | "date" => Ok(Self::CreatedAt),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            _ => Err(AppError::validation(format!(
                "Invalid sort key: '{s}'. Expected one of: createdAt, name, email, status"
            ))),
        }
    }
}

/// Filter state of the inbox page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilterState {
    pub search_term: String,
    /// `None` shows every status.
    pub status: Option<ContactStatus>,
    pub sort_by: ContactSortKey,
    pub sort_order: SortDirection,
}

impl ContactFilterState {
    /// Translate page filters into list query filters.
    pub fn to_filters(&self) -> ContactFilters {
        ContactFilters {
            page: Some(1),
            limit: Some(INBOX_PAGE_SIZE),
            status: self.status,
            search: Some(self.search_term.clone()).filter(|s| !s.is_empty()),
            sort_by: Some(self.sort_by.as_str().to_string()),
            sort_order: Some(self.sort_order),
        }
    }
}

/// Loads inbox messages and counters.
#[derive(Debug, Clone)]
pub struct ContactsFetcher {
    service: ContactService,
}

impl ContactsFetcher {
    pub fn new(service: ContactService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ListFetcher for ContactsFetcher {
    type Filters = ContactFilterState;
    type Item = Contact;
    type Stats = ContactStats;

    const ERROR_MESSAGE: &'static str = "Failed to load messages";
    const HAS_STATS: bool = true;

    async fn fetch_list(&self, filters: &ContactFilterState) -> AppResult<Vec<Contact>> {
        Ok(self.service.list(&filters.to_filters()).await?.items)
    }

    async fn fetch_stats(&self) -> AppResult<Option<ContactStats>> {
        self.service.stats().await.map(Some)
    }
}

/// Message actions on the inbox page. Every successful action reloads
/// the list and the counters.
#[derive(Debug, Clone)]
pub struct ContactActions {
    service: ContactService,
    manager: Arc<ResourceManager<ContactsFetcher>>,
}

impl ContactActions {
    pub fn new(service: ContactService, manager: Arc<ResourceManager<ContactsFetcher>>) -> Self {
        Self { service, manager }
    }

    /// Open a message. Unread messages are marked as read.
    pub async fn view(&self, message: &Contact) -> AppResult<()> {
        if message.status == ContactStatus::Unread {
            self.mark_as_read(&message.id).await?;
        }
        Ok(())
    }

    pub async fn mark_as_read(&self, id: &str) -> AppResult<()> {
        let result = self.service.mark_as_read(id).await;
        self.finish(id, "read", result).await
    }

    pub async fn mark_as_replied(&self, id: &str) -> AppResult<()> {
        let result = self.service.mark_as_replied(id).await;
        self.finish(id, "replied", result).await
    }

    pub async fn archive(&self, id: &str) -> AppResult<()> {
        let result = self.service.archive(id).await;
        self.finish(id, "archived", result).await
    }

    /// Move a message to `status` through the generic update endpoint.
    pub async fn set_status(&self, id: &str, status: ContactStatus) -> AppResult<()> {
        let update = ContactUpdate {
            status: Some(status),
            notes: None,
        };
        let result = self.service.update(id, &update).await;
        self.finish(id, status.as_str(), result).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.service.delete(id).await;
        self.finish(id, "deleted", result).await
    }

    async fn finish<T>(&self, id: &str, action: &str, result: AppResult<T>) -> AppResult<()> {
        match result {
            Ok(_) => {
                info!(message_id = %id, action, "Contact message updated");
                self.manager.refetch_data().await;
                Ok(())
            }
            Err(err) => {
                warn!(message_id = %id, action, error = %err, "Contact message action failed");
                Err(err)
            }
        }
    }
}
