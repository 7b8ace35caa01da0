//! Floor status command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use deskbook_core::error::AppError;
use deskbook_service::DeskCell;

/// Arguments for the status command
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Resolve at this time instead of now (search mode)
    #[arg(long)]
    pub at: Option<String>,
}

/// One table row per desk
#[derive(Debug, Serialize, Tabled)]
pub struct StatusRow {
    /// Floor plan key
    #[tabled(rename = "Desk")]
    pub key: String,
    /// Display label
    #[tabled(rename = "Label")]
    pub label: String,
    /// Resolved status
    #[tabled(rename = "Status")]
    pub status: String,
    /// When the active entry ends
    #[tabled(rename = "Busy Until")]
    pub busy_until: String,
    /// When the next entry starts
    #[tabled(rename = "Next Start")]
    pub next_start: String,
}

impl From<&DeskCell> for StatusRow {
    fn from(cell: &DeskCell) -> Self {
        let (status, busy_until, next_start) = match &cell.resolution {
            Some(resolution) => (
                resolution.status.to_string(),
                match &resolution.active_entry {
                    Some(entry) if entry.end.is_none() => "open".to_string(),
                    Some(entry) => output::format_instant(entry.end),
                    None => "-".to_string(),
                },
                output::format_instant(resolution.upcoming_entry.as_ref().map(|e| e.start)),
            ),
            None => ("missing".to_string(), "-".to_string(), "-".to_string()),
        };

        Self {
            key: cell.key.to_string(),
            label: cell.label.clone(),
            status,
            busy_until,
            next_start,
        }
    }
}

/// Execute the status command
pub async fn execute(
    args: &StatusArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::Session::open(config_path).await?;
    let at = super::parse_at(args.at.as_deref(), session.floor.now())?;
    let view = session.floor.render_at(&session.snapshot, at);

    match format {
        OutputFormat::Json => output::print_json(&view),
        OutputFormat::Table => {
            let rows: Vec<StatusRow> = view.cells.iter().map(StatusRow::from).collect();
            output::print_table(&rows);

            println!("Floor at {}:", view.reference_time.to_rfc3339());
            output::print_kv("Available", &view.summary.available.to_string());
            output::print_kv("Pending", &view.summary.pending.to_string());
            output::print_kv("Booked", &view.summary.booked.to_string());
            if view.summary.missing > 0 {
                output::print_warning(&format!(
                    "{} mapped desk(s) missing from the directory",
                    view.summary.missing
                ));
            }
            if !view.unmapped.is_empty() {
                let unmapped: Vec<&str> = view.unmapped.iter().map(|l| l.as_str()).collect();
                output::print_warning(&format!(
                    "Directory desks without a floor key: {}",
                    unmapped.join(", ")
                ));
            }
            if session.snapshot.rejected_entries() > 0 {
                output::print_warning(&format!(
                    "{} malformed schedule entries were ignored",
                    session.snapshot.rejected_entries()
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use deskbook_core::types::{DeskKey, LocationId};
    use deskbook_entity::{DeskStatus, EntryStatus, Resolution, ScheduleEntry};

    #[test]
    fn test_row_for_open_attendance() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let cell = DeskCell {
            key: DeskKey::from("Table 1"),
            label: "Window".to_string(),
            location_id: LocationId::from("loc-1"),
            resolution: Some(Resolution {
                status: DeskStatus::Booked,
                active_entry: Some(ScheduleEntry::attendance("a", EntryStatus::Active, start, None)),
                upcoming_entry: None,
            }),
        };
        let row = StatusRow::from(&cell);
        assert_eq!(row.status, "booked");
        assert_eq!(row.busy_until, "open");
        assert_eq!(row.next_start, "-");
    }

    #[test]
    fn test_row_for_missing_desk() {
        let cell = DeskCell {
            key: DeskKey::from("Ghost"),
            label: "Ghost".to_string(),
            location_id: LocationId::from("404"),
            resolution: None,
        };
        assert_eq!(StatusRow::from(&cell).status, "missing");
    }
}
