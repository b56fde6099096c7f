//! Public profile CLI commands.

use clap::{Args, Subcommand};

use folio_core::{AppError, AppResult};
use folio_service::fetch::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY, FetchHandle};
use folio_service::validation::{ProfileForm, ensure_valid, validate_profile_form};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the public profile
    Show,
    /// Update profile fields; unset flags keep their current value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Profile image URL
        #[arg(long)]
        profile_image: Option<String>,
        /// Hero image URL
        #[arg(long)]
        hero_image: Option<String>,
    },
}

/// Execute profile commands
pub async fn execute(args: &ProfileArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let service = &ctx.services.personal;

    match &args.command {
        ProfileCommand::Show => {
            let personal = service.clone();
            let fetch = FetchHandle::new(move |()| {
                let personal = personal.clone();
                async move { personal.get().await }
            })
            .with_retry(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY);

            match fetch.immediate(()).await {
                Some(info) => output::print_item(&info, format),
                None => {
                    let message = fetch.state().error.unwrap_or_default();
                    return Err(AppError::internal(message));
                }
            }
        }
        ProfileCommand::Update {
            name,
            title,
            description,
            email,
            phone,
            location,
            profile_image,
            hero_image,
        } => {
            ctx.require_login()?;
            let current = service.get().await?;
            let mut form = ProfileForm::from(&current);

            let set = |slot: &mut String, value: &Option<String>| {
                if let Some(v) = value {
                    *slot = v.clone();
                }
            };
            set(&mut form.name, name);
            set(&mut form.title, title);
            set(&mut form.description, description);
            set(&mut form.email, email);
            for (slot, value) in [
                (&mut form.phone, phone),
                (&mut form.location, location),
                (&mut form.profile_image, profile_image),
                (&mut form.hero_image, hero_image),
            ] {
                if value.is_some() {
                    *slot = value.clone();
                }
            }

            ensure_valid(validate_profile_form(&form))?;
            let updated = service.update(&form.into_update()).await?;
            output::print_success(&format!("Profile updated for {}", updated.name));
        }
    }

    Ok(())
}
