//! Live status CLI commands.

use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use folio_core::{AppError, AppResult};
use folio_entity::status::{ClearAfter, DEFAULT_EMOJI, PREDEFINED_STATUSES, UserStatus};
use folio_service::status::lifecycle::{
    calculate_expiration_time, format_status_date, format_time_ago_at, is_status_active_at,
    status_style_category,
};
use folio_service::status::{StatusManager, StatusPoller, StatusView};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for status commands
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Status subcommand
    #[command(subcommand)]
    pub command: StatusCommand,
}

/// Status subcommands
#[derive(Debug, Subcommand)]
pub enum StatusCommand {
    /// Show the public status badge
    Show,
    /// Show your own status (admin)
    Mine,
    /// Apply a predefined status until the end of the day
    Set {
        /// Predefined status id, see `status presets`
        id: String,
    },
    /// Set a custom status
    Custom {
        /// Status message (at most 80 characters)
        message: String,
        /// Emoji shown next to the message
        #[arg(short, long, default_value = DEFAULT_EMOJI)]
        emoji: String,
        /// When to clear it: never, today, week, or a number of minutes
        #[arg(long, default_value = "never")]
        clear_after: ClearAfter,
    },
    /// Clear your status
    Clear {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show recent statuses
    History {
        /// Number of entries
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List the predefined statuses
    Presets,
    /// Poll the public status and print every change
    Watch {
        /// Polling interval in seconds (defaults to the configured interval)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

/// Status display row for table output
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    emoji: String,
    message: String,
    active: String,
    expires: String,
    updated: String,
}

impl StatusRow {
    fn from_status(status: &UserStatus) -> Self {
        let now = Utc::now();
        Self {
            emoji: status.emoji.clone(),
            message: output::truncate(&status.message, 48),
            active: if is_status_active_at(status, now) { "yes" } else { "no" }.to_string(),
            expires: status
                .expires_at
                .map(|at| format_status_date(at, &Local))
                .unwrap_or_else(|| "never".to_string()),
            updated: format_time_ago_at(status.updated_at, now),
        }
    }
}

/// Predefined status row for table output
#[derive(Debug, Serialize, Tabled)]
struct PresetRow {
    id: &'static str,
    emoji: &'static str,
    label: &'static str,
    category: String,
    description: &'static str,
}

/// Execute status commands
pub async fn execute(args: &StatusArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let history_limit = ctx.config.status.history_limit;
    let manager =
        StatusManager::new(ctx.services.status.clone()).with_history_limit(history_limit);

    match &args.command {
        StatusCommand::Show => {
            let status = ctx.services.status.current().await?;
            match status.and_then(|s| StatusView::from_public(&s, Utc::now())) {
                Some(view) => output::print_item(&view, format),
                None => println!("No status set."),
            }
        }
        StatusCommand::Mine => {
            ctx.require_login()?;
            manager.load().await;
            match manager.panel().current {
                Some(status) => output::print_item(&StatusRow::from_status(&status), format),
                None => println!("No status set."),
            }
        }
        StatusCommand::Set { id } => {
            ctx.require_login()?;
            let status = manager.set_predefined(id).await?;
            output::print_success(&format!("Status set: {} {}", status.emoji, status.message));
        }
        StatusCommand::Custom {
            message,
            emoji,
            clear_after,
        } => {
            ctx.require_login()?;
            let status = manager.set_custom(emoji, message, *clear_after).await?;
            output::print_success(&format!("Status set: {} {}", status.emoji, status.message));
            if let Some(at) = calculate_expiration_time(*clear_after) {
                output::print_kv("Clears", &at.format("%d %b %Y, %I:%M %p").to_string());
            }
        }
        StatusCommand::Clear { force } => {
            ctx.require_login()?;
            if !output::confirm("Clear your current status?", *force)? {
                return Ok(());
            }
            manager.clear().await?;
            output::print_success("Status cleared");
        }
        StatusCommand::History { limit } => {
            ctx.require_login()?;
            let history = ctx
                .services
                .status
                .history(Some(limit.unwrap_or(history_limit)))
                .await?;
            let rows: Vec<StatusRow> = history.iter().map(StatusRow::from_status).collect();
            output::print_list(&rows, format);
        }
        StatusCommand::Presets => {
            let rows: Vec<PresetRow> = PREDEFINED_STATUSES
                .iter()
                .map(|s| PresetRow {
                    id: s.id,
                    emoji: s.emoji,
                    label: s.label,
                    category: status_style_category(s.id).to_string(),
                    description: s.description,
                })
                .collect();
            output::print_list(&rows, format);
        }
        StatusCommand::Watch { interval } => {
            let period = interval
                .map(std::time::Duration::from_secs)
                .unwrap_or_else(|| ctx.config.status.refresh_interval());
            watch(ctx, period, format).await?;
        }
    }

    Ok(())
}

async fn watch(ctx: &Context, period: std::time::Duration, format: OutputFormat) -> AppResult<()> {
    let cancel = CancellationToken::new();
    let poller = StatusPoller::new(ctx.services.status.clone(), period);
    let (mut rx, handle) = poller.spawn(cancel.clone());

    println!("Watching status every {}s, Ctrl-C to stop.", period.as_secs());
    let mut shown: Option<Option<(String, String)>> = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                // Every poll publishes; only print when the badge changes.
                let key = view.as_ref().map(|v| (v.emoji.clone(), v.message.clone()));
                if shown.as_ref() == Some(&key) {
                    continue;
                }
                shown = Some(key);
                match view {
                    Some(view) => output::print_item(&view, format),
                    None => println!("No status set."),
                }
            }
        }
    }

    cancel.cancel();
    handle
        .await
        .map_err(|e| AppError::internal(format!("Status poller failed: {e}")))?;
    Ok(())
}
