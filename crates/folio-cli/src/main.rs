//! Folio CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod output;

use commands::Cli;
use folio_core::config::LoggingConfig;
use folio_core::error::ErrorKind;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging, cli.verbose);

    if let Err(e) = cli.execute(config).await {
        output::print_error(&e.user_message());
        if let Some(serde_json::Value::Object(fields)) = &e.data
            && e.kind == ErrorKind::Validation
        {
            for (field, message) in fields {
                output::print_kv(field, message.as_str().unwrap_or_default());
            }
        }
        if e.status == 401 {
            output::print_warning("Session expired. Sign in again with `folio-cli auth login`.");
        }
        std::process::exit(1);
    }
}

/// Initialize tracing. The CLI logs to stderr at `warn` unless `RUST_LOG`
/// or `--verbose` says otherwise.
fn init_logging(config: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { config.level.as_str() } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        _ => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init(),
    }
}
