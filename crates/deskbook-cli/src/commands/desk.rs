//! Single desk detail command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use deskbook_core::error::AppError;
use deskbook_core::types::DeskKey;
use deskbook_entity::ScheduleEntry;
use deskbook_service::DeskCell;

/// Arguments for the desk command
#[derive(Debug, Args)]
pub struct DeskArgs {
    /// Floor plan desk key, e.g. "Table 2 UP"
    pub key: String,
    /// Resolve at this time instead of now (search mode)
    #[arg(long)]
    pub at: Option<String>,
}

/// One schedule row
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Entry id
    #[tabled(rename = "Id")]
    pub id: String,
    /// Booking or attendance
    #[tabled(rename = "Kind")]
    pub kind: String,
    /// Lifecycle status
    #[tabled(rename = "Status")]
    pub status: String,
    /// Start
    #[tabled(rename = "Start")]
    pub start: String,
    /// End
    #[tabled(rename = "End")]
    pub end: String,
    /// Holder
    #[tabled(rename = "Holder")]
    pub holder: String,
}

impl From<&ScheduleEntry> for EntryRow {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            kind: entry.kind.to_string(),
            status: entry.status.to_string(),
            start: output::format_instant(Some(entry.start)),
            end: entry
                .end
                .map(|end| output::format_instant(Some(end)))
                .unwrap_or_else(|| "open".to_string()),
            holder: entry.holder.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Serialize)]
struct DeskDetail<'a> {
    cell: &'a DeskCell,
    schedule: &'a [ScheduleEntry],
}

/// Execute the desk command
pub async fn execute(
    args: &DeskArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::Session::open(config_path).await?;
    let at = super::parse_at(args.at.as_deref(), session.floor.now())?;
    let key = DeskKey::from(args.key.as_str());

    let cell = session.floor.cell(&session.snapshot, &key, at)?;
    let desk = session.floor.desk(&session.snapshot, &key)?;

    let mut schedule = desk.schedule.clone();
    schedule.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    match format {
        OutputFormat::Json => output::print_json(&DeskDetail {
            cell: &cell,
            schedule: &schedule,
        }),
        OutputFormat::Table => {
            println!("Desk {} ({}):", cell.key, cell.label);
            output::print_kv("Location", cell.location_id.as_str());
            output::print_kv("At", &at.to_rfc3339());
            if let Some(resolution) = &cell.resolution {
                output::print_kv("Status", resolution.status.as_str());
                output::print_kv(
                    "Active Entry",
                    &describe(resolution.active_entry.as_ref()),
                );
                output::print_kv(
                    "Upcoming Entry",
                    &describe(resolution.upcoming_entry.as_ref()),
                );
            }
            println!();
            let rows: Vec<EntryRow> = schedule.iter().map(EntryRow::from).collect();
            output::print_table(&rows);
        }
    }

    Ok(())
}

fn describe(entry: Option<&ScheduleEntry>) -> String {
    match entry {
        None => "-".to_string(),
        Some(entry) => format!(
            "{} {} {} ({} → {})",
            entry.kind,
            entry.id,
            entry.status,
            output::format_instant(Some(entry.start)),
            entry
                .end
                .map(|end| output::format_instant(Some(end)))
                .unwrap_or_else(|| "open".to_string())
        ),
    }
}
