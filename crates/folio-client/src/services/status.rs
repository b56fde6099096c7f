//! Live status endpoints.

use std::sync::Arc;

use tracing::info;

use folio_core::error::AppError;
use folio_core::types::QueryParams;
use folio_core::AppResult;
use folio_entity::status::{CreateStatusRequest, PublicStatus, UpdateStatusRequest, UserStatus};

use crate::client::ApiClient;
use crate::endpoints::status as ep;

/// Default number of history entries.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Typed access to `/status`.
#[derive(Debug, Clone)]
pub struct StatusService {
    client: Arc<ApiClient>,
}

impl StatusService {
    /// Creates a new status service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Public current status. `None` when nothing is set.
    pub async fn current(&self) -> AppResult<Option<PublicStatus>> {
        not_found_as_none(self.client.get(ep::CURRENT).await)
    }

    /// The admin's own status. `None` when nothing is set.
    pub async fn mine(&self) -> AppResult<Option<UserStatus>> {
        not_found_as_none(self.client.get(ep::MINE).await)
    }

    pub async fn set(&self, req: &CreateStatusRequest) -> AppResult<UserStatus> {
        let status: UserStatus = self.client.post(ep::SET, req).await?;
        info!(status_id = %status.id, emoji = %status.emoji, "Status set");
        Ok(status)
    }

    pub async fn update(&self, id: &str, req: &UpdateStatusRequest) -> AppResult<UserStatus> {
        let status: UserStatus = self.client.put(&ep::by_id(id), req).await?;
        info!(status_id = %status.id, "Status updated");
        Ok(status)
    }

    pub async fn clear(&self) -> AppResult<()> {
        let _: Option<serde_json::Value> = self.client.delete(ep::CLEAR).await?;
        info!("Status cleared");
        Ok(())
    }

    /// Most recent statuses, newest first as returned by the backend.
    pub async fn history(&self, limit: Option<u32>) -> AppResult<Vec<UserStatus>> {
        let query = QueryParams::new().push("limit", limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
        let history: Option<Vec<UserStatus>> =
            self.client.get_with_query(ep::HISTORY, &query).await?;
        Ok(history.unwrap_or_default())
    }
}

fn not_found_as_none<T>(result: Result<Option<T>, AppError>) -> AppResult<Option<T>> {
    match result {
        Err(err) if err.status == 404 => Ok(None),
        other => other,
    }
}
