//! Booking submission command.

use std::sync::Arc;

use clap::Args;

use crate::output::{self, OutputFormat};
use deskbook_core::error::AppError;
use deskbook_core::types::DeskKey;
use deskbook_service::{BookingRequest, BookingService, HttpBookingSubmitter};

/// Arguments for the book command
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Floor plan desk key, e.g. "Table 2 UP"
    pub key: String,
    /// Start of the booking
    #[arg(long)]
    pub start: String,
    /// End of the booking
    #[arg(long)]
    pub end: String,
    /// Note for the approver
    #[arg(long)]
    pub note: Option<String>,
    /// Submit even if the window overlaps existing entries
    #[arg(long)]
    pub force: bool,
}

/// Execute the book command
pub async fn execute(
    args: &BookArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::Session::open(config_path).await?;
    let key = DeskKey::from(args.key.as_str());
    let desk = session.floor.desk(&session.snapshot, &key)?;

    let request = BookingRequest {
        location_id: desk.location_id.clone(),
        start: super::parse_instant(&args.start, "--start")?,
        end: super::parse_instant(&args.end, "--end")?,
        note: args.note.clone(),
    };

    let submitter = Arc::new(HttpBookingSubmitter::new(&session.config.directory)?);
    let service = BookingService::new(submitter, *session.floor.resolver());
    let receipt = service.submit(desk, request, args.force).await?;

    match format {
        OutputFormat::Json => output::print_json(&receipt),
        OutputFormat::Table => {
            output::print_success(&format!("Booking for '{}' submitted", key));
            output::print_kv(
                "Id",
                receipt.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
            );
            output::print_kv("Status", receipt.status.as_str());
        }
    }

    Ok(())
}
