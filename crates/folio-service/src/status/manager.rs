//! Admin status panel state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use folio_client::services::StatusService;
use folio_client::services::status::DEFAULT_HISTORY_LIMIT;
use folio_core::{AppError, AppResult};
use folio_entity::status::{ClearAfter, CreateStatusRequest, DEFAULT_EMOJI, UserStatus};

use super::lifecycle::{
    MAX_MESSAGE_LENGTH, find_predefined_status_by_id, sanitize_status_message,
    validate_status_message,
};

/// Snapshot of the status panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusPanel {
    pub current: Option<UserStatus>,
    pub history: Vec<UserStatus>,
    pub loading: bool,
    pub saving: bool,
}

/// Loads, sets and clears the admin's own status.
#[derive(Debug)]
pub struct StatusManager {
    service: StatusService,
    history_limit: u32,
    panel: Mutex<StatusPanel>,
}

impl StatusManager {
    pub fn new(service: StatusService) -> Self {
        Self {
            service,
            history_limit: DEFAULT_HISTORY_LIMIT,
            panel: Mutex::new(StatusPanel {
                loading: true,
                ..Default::default()
            }),
        }
    }

    /// Number of history entries requested.
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn panel(&self) -> StatusPanel {
        self.lock().clone()
    }

    /// Fetch the current status and the history concurrently. Failures
    /// degrade to no status and an empty history.
    pub async fn load(&self) {
        let (current, history) = futures::join!(
            self.service.mine(),
            self.service.history(Some(self.history_limit))
        );

        let current = current.unwrap_or_else(|err| {
            warn!(error = %err, "Failed to fetch current status");
            None
        });
        let history = history.unwrap_or_else(|err| {
            warn!(error = %err, "Failed to fetch status history");
            Vec::new()
        });

        let mut panel = self.lock();
        panel.current = current;
        panel.history = history;
        panel.loading = false;
    }

    /// Apply a catalog entry until the end of the day.
    pub async fn set_predefined(&self, id: &str) -> AppResult<UserStatus> {
        let predefined = find_predefined_status_by_id(id)
            .ok_or_else(|| AppError::validation(format!("Unknown predefined status: '{id}'")))?;
        let req = CreateStatusRequest {
            emoji: predefined.emoji.to_string(),
            message: predefined.description.to_string(),
            predefined_status_id: Some(predefined.id.to_string()),
            clear_after: Some(ClearAfter::Today),
        };
        self.save(req).await
    }

    /// Set a custom status. The message is trimmed and capped before
    /// sending; blank or overlong messages are rejected locally.
    pub async fn set_custom(
        &self,
        emoji: &str,
        message: &str,
        clear_after: ClearAfter,
    ) -> AppResult<UserStatus> {
        if !validate_status_message(message) {
            return Err(AppError::validation(format!(
                "Status message must be between 1 and {MAX_MESSAGE_LENGTH} characters"
            )));
        }
        let emoji = match emoji.trim() {
            "" => DEFAULT_EMOJI,
            e => e,
        };
        let req = CreateStatusRequest {
            emoji: emoji.to_string(),
            message: sanitize_status_message(message),
            predefined_status_id: None,
            clear_after: Some(clear_after),
        };
        self.save(req).await
    }

    /// Clear the status, then reload the history.
    pub async fn clear(&self) -> AppResult<()> {
        self.lock().saving = true;
        let result = self.service.clear().await;
        if result.is_ok() {
            self.lock().current = None;
            match self.service.history(Some(self.history_limit)).await {
                Ok(history) => self.lock().history = history,
                Err(err) => warn!(error = %err, "Failed to fetch status history"),
            }
        }
        self.lock().saving = false;
        result
    }

    async fn save(&self, req: CreateStatusRequest) -> AppResult<UserStatus> {
        self.lock().saving = true;
        let result = self.service.set(&req).await;
        match &result {
            Ok(status) => {
                debug!(
                    status_id = %status.id,
                    predefined = ?req.predefined_status_id,
                    "Refreshing status panel"
                );
                self.load().await;
            }
            Err(err) => warn!(error = %err, "Failed to set status"),
        }
        self.lock().saving = false;
        result
    }

    fn lock(&self) -> MutexGuard<'_, StatusPanel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
