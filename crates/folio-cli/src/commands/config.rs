//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use folio_core::config::AppConfig;
use folio_core::{AppError, AppResult};
use folio_service::validation::is_valid_url;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Check the merged configuration for unusable values
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.auth.google_client_secret = mask_secret(&shown.auth.google_client_secret);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            let problems = check(config);
            if !problems.is_empty() {
                for problem in &problems {
                    output::print_error(problem);
                }
                return Err(AppError::configuration(format!(
                    "Configuration '{env}' has {} problem(s)",
                    problems.len()
                )));
            }
            output::print_success(&format!("Configuration '{env}' is valid"));
            output::print_kv("API", &config.api.base_url);
            output::print_kv("Auth origin", &config.auth.api_url);
            output::print_kv("Site", &config.site.bind_addr());
            output::print_kv(
                "Status refresh",
                &format!("{}s", config.status.refresh_interval_seconds),
            );
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {e}")))?;
            }
            std::fs::write(out_path, default_config)
                .map_err(|e| AppError::internal(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}

/// Values the client cannot work with.
fn check(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if !is_valid_url(&config.api.base_url) {
        problems.push(format!("api.base_url is not a URL: '{}'", config.api.base_url));
    }
    if !is_valid_url(&config.auth.api_url) {
        problems.push(format!("auth.api_url is not a URL: '{}'", config.auth.api_url));
    }
    if config.api.timeout_ms == 0 {
        problems.push("api.timeout_ms must be greater than 0".to_string());
    }
    if config.status.refresh_interval_seconds == 0 {
        problems.push("status.refresh_interval_seconds must be greater than 0".to_string());
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        problems.push(format!(
            "logging.format must be 'json' or 'pretty', got '{}'",
            config.logging.format
        ));
    }
    problems
}

/// Keep the last four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("GOCSPX-abcdef1234"), "****1234");
    }

    #[test]
    fn test_default_config_has_no_problems() {
        assert!(check(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_check_reports_bad_values() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        config.status.refresh_interval_seconds = 0;
        config.logging.format = "xml".to_string();

        let problems = check(&config);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("api.base_url"));
    }
}
