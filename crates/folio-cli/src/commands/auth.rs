//! Sign-in and session CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use folio_auth::session_id;
use folio_auth::{CallbackOutcome, CallbackParams, backend_login_url, google_oauth_url, handle_callback};
use folio_core::AppResult;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Print the URL that starts Google sign-in
    Login {
        /// Use the direct Google authorization URL instead of the backend
        #[arg(long)]
        direct: bool,
    },
    /// Complete sign-in from the callback URL the browser landed on
    Callback {
        /// Full callback URL, including its query string
        url: String,
    },
    /// Sign out and forget the stored tokens
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Ask the backend instead of reading the cached user
        #[arg(long)]
        remote: bool,
    },
}

#[derive(Debug, Serialize)]
struct WhoamiView {
    name: String,
    email: String,
    role: String,
    admin: bool,
}

/// Execute auth commands
pub async fn execute(args: &AuthArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let auth = &ctx.config.auth;

    match &args.command {
        AuthCommand::Login { direct } => {
            let url = if *direct {
                google_oauth_url(auth)?
            } else {
                backend_login_url(ctx.store.as_ref(), auth)?
            };
            println!("Open this URL in a browser to sign in:\n\n  {url}\n");
            println!("Then run `folio-cli auth callback '<redirected URL>'`.");
        }
        AuthCommand::Callback { url } => {
            let params = CallbackParams::from_url(url)?;
            match handle_callback(ctx.store.as_ref(), &params, auth)? {
                CallbackOutcome::Redirect { to, .. } => {
                    output::print_success("Signed in");
                    output::print_kv("Continue at", &to);
                }
                CallbackOutcome::Failed { message, .. } => {
                    output::print_error(&message);
                }
            }
        }
        AuthCommand::Logout => {
            ctx.services.auth.logout()?;
            session_id::clear_session_id(ctx.store.as_ref())?;
            output::print_success("Signed out");
        }
        AuthCommand::Whoami { remote } => {
            let user = if *remote {
                ctx.require_login()?;
                Some(ctx.services.auth.profile().await?)
            } else {
                ctx.services.auth.current_user()?
            };
            match user {
                Some(user) => output::print_item(
                    &WhoamiView {
                        admin: user.is_admin(),
                        role: user.role.to_string(),
                        name: user.name,
                        email: user.email,
                    },
                    format,
                ),
                None => println!("Not signed in."),
            }
        }
    }

    Ok(())
}
