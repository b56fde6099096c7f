//! Public status badge refresher.
//!
//! Polls the public status endpoint right away and then on a fixed
//! interval, publishing the latest [`StatusView`] on a `watch` channel
//! until the cancellation token fires.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use folio_client::services::StatusService;
use folio_entity::status::{PublicStatus, StatusCategory};

use super::lifecycle::{display_category, format_status_timestamp, format_time_ago_at};

/// Default polling period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest period the poller accepts; shorter ones are raised to this.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// What the status badge renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub emoji: String,
    pub message: String,
    pub category: StatusCategory,
    /// Relative age, e.g. `"5m ago"`.
    pub time_ago: String,
    /// Absolute "last updated" text in IST.
    pub last_updated: String,
}

impl StatusView {
    /// Build the badge for `status`, or `None` when it is inactive.
    pub fn from_public(status: &PublicStatus, now: DateTime<Utc>) -> Option<Self> {
        if !status.is_active {
            return None;
        }
        Some(Self {
            emoji: status.emoji.clone(),
            message: status.message.clone(),
            category: display_category(status),
            time_ago: format_time_ago_at(status.last_updated, now),
            last_updated: format_status_timestamp(status.last_updated),
        })
    }
}

/// Periodic fetcher for the public status.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    service: StatusService,
    interval: Duration,
}

impl StatusPoller {
    /// Periods below [`MIN_REFRESH_INTERVAL`] (including zero) are raised
    /// to it.
    pub fn new(service: StatusService, interval: Duration) -> Self {
        Self {
            service,
            interval: clamp_interval(interval),
        }
    }

    /// Effective polling period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch once. Errors and missing or inactive statuses yield `None`.
    pub async fn poll_once(&self) -> Option<StatusView> {
        match self.service.current().await {
            Ok(Some(status)) => StatusView::from_public(&status, Utc::now()),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Failed to fetch public status");
                None
            }
        }
    }

    /// Start polling in the background.
    ///
    /// The receiver starts at `None` and is updated after every poll. The
    /// task exits when `cancel` fires.
    pub fn spawn(
        self,
        cancel: CancellationToken,
    ) -> (watch::Receiver<Option<StatusView>>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = self.interval.as_secs(), "Status poller started");

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let view = self.poll_once().await;
                        debug!(present = view.is_some(), "Public status polled");
                        tx.send_replace(view);
                    }
                }
            }

            info!("Status poller stopped");
        });
        (rx, handle)
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    if interval < MIN_REFRESH_INTERVAL {
        warn!(
            requested_ms = interval.as_millis() as u64,
            "Status refresh interval too short, using minimum"
        );
        MIN_REFRESH_INTERVAL
    } else {
        interval
    }
}
