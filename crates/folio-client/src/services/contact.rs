//! Contact form and inbox endpoints.

use std::sync::Arc;

use tracing::info;

use folio_core::AppResult;
use folio_core::types::{Paged, QueryParams, SortDirection};
use folio_entity::contact::{
    Contact, ContactStats, ContactStatus, ContactSubmission, ContactUpdate, ContactsPage,
};
use folio_entity::system::MessageResponse;

use crate::client::ApiClient;
use crate::endpoints::contact as ep;

/// Filters accepted by the message list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortDirection>,
}

impl ContactFilters {
    /// Encode the set filters as query parameters.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page.filter(|p| *p > 0))
            .push_opt("limit", self.limit.filter(|l| *l > 0))
            .push_opt("status", self.status)
            .push_non_empty("search", self.search.as_deref())
            .push_non_empty("sortBy", self.sort_by.as_deref())
            .push_opt("sortOrder", self.sort_order)
    }
}

/// Typed access to `/contact`.
#[derive(Debug, Clone)]
pub struct ContactService {
    client: Arc<ApiClient>,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Submits the public contact form.
    pub async fn submit(&self, submission: &ContactSubmission) -> AppResult<Contact> {
        let contact: Contact = self.client.post(ep::SUBMIT, submission).await?;
        info!(contact_id = %contact.id, "Contact message submitted");
        Ok(contact)
    }

    pub async fn list(&self, filters: &ContactFilters) -> AppResult<Paged<Contact>> {
        let page: ContactsPage = self
            .client
            .get_with_query(ep::LIST, &filters.to_query())
            .await?;
        Ok(page.into())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Contact> {
        self.client.get(&ep::by_id(id)).await
    }

    pub async fn update(&self, id: &str, update: &ContactUpdate) -> AppResult<Contact> {
        let contact: Contact = self.client.put(&ep::by_id(id), update).await?;
        info!(contact_id = %id, status = %contact.status, "Contact message updated");
        Ok(contact)
    }

    pub async fn delete(&self, id: &str) -> AppResult<MessageResponse> {
        let resp: Option<MessageResponse> = self.client.delete(&ep::by_id(id)).await?;
        info!(contact_id = %id, "Contact message deleted");
        Ok(resp.unwrap_or_default())
    }

    pub async fn stats(&self) -> AppResult<ContactStats> {
        self.client.get(ep::STATS).await
    }

    pub async fn mark_as_read(&self, id: &str) -> AppResult<Contact> {
        self.transition(&ep::mark_read(id), id, ContactStatus::Read).await
    }

    pub async fn mark_as_replied(&self, id: &str) -> AppResult<Contact> {
        self.transition(&ep::mark_replied(id), id, ContactStatus::Replied)
            .await
    }

    pub async fn archive(&self, id: &str) -> AppResult<Contact> {
        self.transition(&ep::archive(id), id, ContactStatus::Archived)
            .await
    }

    async fn transition(&self, path: &str, id: &str, target: ContactStatus) -> AppResult<Contact> {
        let contact: Contact = self.client.put(path, &serde_json::json!({})).await?;
        info!(contact_id = %id, status = %target, "Contact message status changed");
        Ok(contact)
    }
}
