//! Backend health CLI commands.

use clap::{Args, Subcommand};

use folio_core::AppResult;
use folio_entity::system::{TestEmailKind, TestEmailRequest};
use folio_service::validation::{ValidationErrors, ensure_valid, validate_email};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for health commands
#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Health subcommand
    #[command(subcommand)]
    pub command: HealthCommand,
}

/// Health subcommands
#[derive(Debug, Subcommand)]
pub enum HealthCommand {
    /// Ping the backend health endpoint
    Check,
    /// Ask the backend to send a test email
    TestEmail {
        /// Recipient address
        email: String,
        /// verification, reset or contact
        #[arg(short, long)]
        kind: Option<TestEmailKind>,
    },
}

/// Execute health commands
pub async fn execute(args: &HealthArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let service = &ctx.services.health;

    match &args.command {
        HealthCommand::Check => {
            let health = service.health().await?;
            match format {
                OutputFormat::Json => output::print_item(&health, format),
                OutputFormat::Table => {
                    output::print_success(&format!("{} is {}", health.service, health.status));
                    output::print_kv("Checked at", &health.timestamp.to_rfc3339());
                    output::print_kv("API", ctx.client.base_url().as_str());
                }
            }
        }
        HealthCommand::TestEmail { email, kind } => {
            let mut errors = ValidationErrors::new();
            if let Err(msg) = validate_email(email) {
                errors.insert("email".to_string(), msg);
            }
            ensure_valid(errors)?;

            let resp = service
                .send_test_email(&TestEmailRequest {
                    email: email.trim().to_string(),
                    kind: *kind,
                })
                .await?;
            output::print_success(&resp.message);
            output::print_kv("Type", &resp.kind);
        }
    }

    Ok(())
}
