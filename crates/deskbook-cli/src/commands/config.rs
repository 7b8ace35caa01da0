//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use deskbook_core::config::AppConfig;
use deskbook_core::error::AppError;

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
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redact(super::load_config(config_path)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{:#?}", config),
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Desk API: {}", config.directory.desks_url());
                println!("  Bookings API: {}", config.directory.bookings_url());
                println!(
                    "  Poll interval: {}s",
                    config.directory.poll_interval_seconds
                );
                println!("  Mapped desks: {}", config.floor.desks.len());
                println!(
                    "  Open-ended bookings: {:?}",
                    config.resolver.open_ended_bookings
                );
            }
            Err(e) => {
                return Err(AppError::configuration(format!(
                    "Configuration '{}' is invalid: {}",
                    config_path, e.message
                )));
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

/// Mask the API token for display
fn redact(mut config: AppConfig) -> AppConfig {
    if config.directory.api_token.is_some() {
        config.directory.api_token = Some("****".to_string());
    }
    config
}
