//! Schedule entry kinds and statuses.

pub mod entry;

pub use entry::ScheduleEntry;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::availability::DeskStatus;

/// Which upstream collection an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A reservation of a future or current interval.
    Booking,
    /// A physical check-in.
    Attendance,
}

impl EntryKind {
    /// Numeric priority (higher wins). Physical presence outranks a reservation.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Booking => 1,
            Self::Attendance => 2,
        }
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Attendance => "attendance",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a booking or attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Awaiting admin approval.
    Pending,
    /// Approved reservation.
    Accepted,
    /// Checked-in occupancy.
    Active,
    /// Rejected or cancelled.
    Declined,
    /// Finished.
    Completed,
}

impl EntryStatus {
    /// Declined and completed entries never affect availability.
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Declined | Self::Completed)
    }

    /// The desk status this entry produces while it is in effect.
    pub fn occupancy(&self) -> Option<DeskStatus> {
        match self {
            Self::Pending => Some(DeskStatus::Pending),
            Self::Accepted | Self::Active => Some(DeskStatus::Booked),
            Self::Declined | Self::Completed => None,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Active => "active",
            Self::Declined => "declined",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = deskbook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" | "approved" | "confirmed" => Ok(Self::Accepted),
            "active" | "checked_in" => Ok(Self::Active),
            "declined" | "rejected" | "cancelled" | "canceled" => Ok(Self::Declined),
            "completed" | "finished" => Ok(Self::Completed),
            _ => Err(deskbook_core::AppError::validation(format!(
                "Invalid entry status: '{s}'"
            ))),
        }
    }
}
