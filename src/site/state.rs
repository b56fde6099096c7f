//! Shared state handed to every route.

use std::sync::Arc;

use tokio::sync::watch;

use folio_client::Services;
use folio_core::config::AppConfig;
use folio_service::status::StatusView;

/// Application state for the site router.
#[derive(Debug, Clone)]
pub struct SiteState {
    /// Merged configuration.
    pub config: Arc<AppConfig>,
    /// Backend API services.
    pub services: Services,
    /// Latest public status published by the poller.
    pub status: watch::Receiver<Option<StatusView>>,
}

impl SiteState {
    pub fn new(
        config: Arc<AppConfig>,
        services: Services,
        status: watch::Receiver<Option<StatusView>>,
    ) -> Self {
        Self {
            config,
            services,
            status,
        }
    }

    /// The badge currently shown, if any.
    pub fn current_status(&self) -> Option<StatusView> {
        self.status.borrow().clone()
    }
}
