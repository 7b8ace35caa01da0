//! Schedule entry value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskbook_core::types::EntryId;

use super::{EntryKind, EntryStatus};

/// A single booking or attendance on a desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Identifier, unique within the desk's schedule.
    pub id: EntryId,
    /// Booking or attendance.
    pub kind: EntryKind,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// When the entry begins.
    pub start: DateTime<Utc>,
    /// When the entry ends. `None` means open-ended.
    pub end: Option<DateTime<Utc>>,
    /// Who holds the desk, if the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
}

impl ScheduleEntry {
    /// Create a bounded booking.
    pub fn booking(
        id: impl Into<EntryId>,
        status: EntryStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: EntryKind::Booking,
            status,
            start,
            end: Some(end),
            holder: None,
        }
    }

    /// Create an attendance, optionally open-ended.
    pub fn attendance(
        id: impl Into<EntryId>,
        status: EntryStatus,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: EntryKind::Attendance,
            status,
            start,
            end,
            holder: None,
        }
    }

    /// Attach a holder name.
    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = Some(holder.into());
        self
    }

    /// Whether the entry has no end.
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }
}
