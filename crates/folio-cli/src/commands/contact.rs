//! Contact inbox CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use folio_core::types::SortDirection;
use folio_core::{AppError, AppResult};
use folio_entity::contact::{Contact, ContactStatus, ContactSubmission};
use folio_service::ResourceManager;
use folio_service::contact::{ContactActions, ContactSortKey, ContactsFetcher};
use folio_service::validation::{ensure_valid, validate_contact_form};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for contact commands
#[derive(Debug, Args)]
pub struct ContactArgs {
    /// Contact subcommand
    #[command(subcommand)]
    pub command: ContactCommand,
}

/// Contact subcommands
#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// List inbox messages
    List {
        /// Search in name, email and subject
        #[arg(short, long)]
        search: Option<String>,
        /// unread, read, replied or archived
        #[arg(long)]
        status: Option<ContactStatus>,
        /// createdAt, name, email or status
        #[arg(long, default_value = "createdAt")]
        sort_by: ContactSortKey,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortDirection,
    },
    /// Show a message, marking it as read
    Show {
        /// Message id
        id: String,
    },
    /// Mark a message as read
    Read {
        /// Message id
        id: String,
    },
    /// Mark a message as replied
    Replied {
        /// Message id
        id: String,
    },
    /// Archive a message
    Archive {
        /// Message id
        id: String,
    },
    /// Move a message to any status
    SetStatus {
        /// Message id
        id: String,
        /// Target status
        status: ContactStatus,
    },
    /// Delete a message
    Delete {
        /// Message id
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show inbox counters
    Stats,
    /// Send a message through the public contact form
    Submit {
        /// Sender name
        #[arg(long)]
        name: String,
        /// Sender email
        #[arg(long)]
        email: String,
        /// Subject line
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
}

/// Message display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ContactRow {
    id: String,
    status: &'static str,
    from: String,
    subject: String,
    received: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id.clone(),
            status: c.status.as_str(),
            from: format!("{} <{}>", c.name, c.email),
            subject: output::truncate(&c.subject, 40),
            received: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute contact commands
pub async fn execute(args: &ContactArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let service = ctx.services.contact.clone();

    if let ContactCommand::Submit {
        name,
        email,
        subject,
        message,
    } = &args.command
    {
        let submission = ContactSubmission {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        };
        ensure_valid(validate_contact_form(&submission))?;
        service.submit(&submission).await?;
        output::print_success("Message sent. Thank you for reaching out!");
        return Ok(());
    }

    ctx.require_login()?;
    let manager = Arc::new(ResourceManager::with_debounce(
        ContactsFetcher::new(service.clone()),
        ctx.config.admin.debounce(),
    ));
    let actions = ContactActions::new(service.clone(), Arc::clone(&manager));

    match &args.command {
        ContactCommand::List {
            search,
            status,
            sort_by,
            order,
        } => {
            manager.update_filters(|f| {
                f.search_term = search.clone().unwrap_or_default();
                f.status = *status;
                f.sort_by = *sort_by;
                f.sort_order = *order;
            });
            manager.mount().await;

            let state = manager.snapshot();
            if let Some(message) = state.error {
                return Err(AppError::internal(message));
            }
            let rows: Vec<ContactRow> = state.items.iter().map(ContactRow::from).collect();
            output::print_list(&rows, format);
            if let (Some(stats), OutputFormat::Table) = (state.stats, format) {
                println!("{} total, {} unread", stats.total, stats.unread);
            }
        }
        ContactCommand::Show { id } => {
            let message = service.get_by_id(id).await?;
            actions.view(&message).await?;
            output::print_item(&message, format);
        }
        ContactCommand::Read { id } => {
            actions.mark_as_read(id).await?;
            output::print_success("Marked as read");
        }
        ContactCommand::Replied { id } => {
            actions.mark_as_replied(id).await?;
            output::print_success("Marked as replied");
        }
        ContactCommand::Archive { id } => {
            actions.archive(id).await?;
            output::print_success("Message archived");
        }
        ContactCommand::SetStatus { id, status } => {
            actions.set_status(id, *status).await?;
            output::print_success(&format!("Message moved to {status}"));
        }
        ContactCommand::Delete { id, force } => {
            if !output::confirm(&format!("Delete message {id}?"), *force)? {
                return Ok(());
            }
            actions.delete(id).await?;
            output::print_success("Message deleted");
        }
        ContactCommand::Stats => {
            let stats = service.stats().await?;
            output::print_item(&stats, format);
        }
        ContactCommand::Submit { .. } => {}
    }

    Ok(())
}
