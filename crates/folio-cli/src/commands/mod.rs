//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod contact;
pub mod health;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod status;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use folio_auth::FileSessionStore;
use folio_client::{ApiClient, Services};
use folio_core::config::AppConfig;
use folio_core::{AppError, AppResult};

use crate::output::OutputFormat;

/// Folio portfolio admin console
#[derive(Debug, Parser)]
#[command(name = "folio-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short = 'c', long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Override the backend API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log at the configured level instead of warnings only
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Live status ("presence")
    Status(status::StatusArgs),
    /// Portfolio projects
    Projects(projects::ProjectsArgs),
    /// Skills
    Skills(skills::SkillsArgs),
    /// Contact inbox
    Contact(contact::ContactArgs),
    /// Public profile
    Profile(profile::ProfileArgs),
    /// Sign-in and session
    Auth(auth::AuthArgs),
    /// Configuration
    Config(config::ConfigArgs),
    /// Backend health and test email
    Health(health::HealthArgs),
}

impl Cli {
    /// Load configuration, applying the command-line overrides.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::load_from(&self.config_dir, &self.env)?;
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        Ok(config)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, &self.env, self.format);
        }

        let ctx = Context::new(config)?;
        match &self.command {
            Commands::Status(args) => status::execute(args, &ctx, self.format).await,
            Commands::Projects(args) => projects::execute(args, &ctx, self.format).await,
            Commands::Skills(args) => skills::execute(args, &ctx, self.format).await,
            Commands::Contact(args) => contact::execute(args, &ctx, self.format).await,
            Commands::Profile(args) => profile::execute(args, &ctx, self.format).await,
            Commands::Auth(args) => auth::execute(args, &ctx, self.format).await,
            Commands::Health(args) => health::execute(args, &ctx, self.format).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Everything a command needs to talk to the backend.
#[derive(Debug)]
pub struct Context {
    pub config: AppConfig,
    pub store: Arc<FileSessionStore>,
    pub client: Arc<ApiClient>,
    pub services: Services,
}

impl Context {
    /// Open the session file and build the API client on top of it.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = Arc::new(FileSessionStore::open(&config.auth.session_dir)?);
        let client = ApiClient::new(config.api.clone(), store.clone())?
            .with_login_route(config.auth.login_route.clone());
        let client = Arc::new(client);
        let services = Services::new(Arc::clone(&client));
        Ok(Self {
            config,
            store,
            client,
            services,
        })
    }

    /// Fail early when no access token is stored.
    pub fn require_login(&self) -> AppResult<()> {
        if self.services.auth.is_authenticated()? {
            Ok(())
        } else {
            Err(AppError::authentication(
                "Not signed in. Run `folio-cli auth login` first.",
            ))
        }
    }
}
