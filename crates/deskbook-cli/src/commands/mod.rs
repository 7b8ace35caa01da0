//! CLI command definitions and dispatch.

pub mod book;
pub mod config;
pub mod desk;
pub mod status;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use deskbook_core::clock::{Clock, SystemClock};
use deskbook_core::config::AppConfig;
use deskbook_core::error::AppError;
use deskbook_entity::record::parse_timestamp;
use deskbook_service::{
    AvailabilityResolver, DeskDirectory, DeskKeyMap, DirectorySnapshot, FloorService,
    HttpDeskDirectory,
};

/// DeskBook: office desk availability and booking
#[derive(Debug, Parser)]
#[command(name = "deskbook", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the status of every desk on the floor
    Status(status::StatusArgs),
    /// Show one desk in detail
    Desk(desk::DeskArgs),
    /// Submit a booking
    Book(book::BookArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Status(args) => status::execute(args, &self.config, self.format).await,
            Commands::Desk(args) => desk::execute(args, &self.config, self.format).await,
            Commands::Book(args) => book::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Everything a query command needs: config, floor service, and one fresh snapshot.
pub struct Session {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Floor renderer built from the config.
    pub floor: FloorService,
    /// Directory contents fetched for this invocation.
    pub snapshot: Arc<DirectorySnapshot>,
}

impl Session {
    /// Load config and fetch the directory once.
    pub async fn open(config_path: &str) -> Result<Self, AppError> {
        let config = load_config(config_path)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let key_map = DeskKeyMap::from_config(&config.floor)?;
        let resolver = AvailabilityResolver::from_config(&config.resolver);
        let floor = FloorService::new(key_map, resolver, Arc::clone(&clock));

        let directory = HttpDeskDirectory::new(&config.directory)?;
        let records = directory.fetch_desks().await?;
        let snapshot = Arc::new(DirectorySnapshot::from_records(records, clock.now()));
        tracing::debug!(
            desks = snapshot.len(),
            rejected = snapshot.rejected_entries(),
            "Desk directory fetched"
        );

        Ok(Self {
            config,
            floor,
            snapshot,
        })
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: parse an optional `--at` value, defaulting to `now`
pub fn parse_at(raw: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    match raw {
        None => Ok(now),
        Some(raw) => parse_instant(raw, "--at"),
    }
}

/// Helper: parse a user-supplied instant, naming the flag on failure
pub fn parse_instant(raw: &str, flag: &str) -> Result<DateTime<Utc>, AppError> {
    parse_timestamp(raw).ok_or_else(|| {
        AppError::validation(format!(
            "{flag} '{raw}' is not a valid time (expected e.g. 2025-01-10T09:00:00Z)"
        ))
    })
}
