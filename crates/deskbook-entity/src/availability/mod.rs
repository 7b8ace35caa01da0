//! Availability classification and resolution result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::ScheduleEntry;

/// What the floor plan shows for a desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskStatus {
    /// Free to book.
    Available,
    /// Has a booking awaiting approval.
    Pending,
    /// Reserved or occupied.
    Booked,
}

impl DeskStatus {
    /// How restrictive the status is (higher is busier).
    pub fn severity(&self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Pending => 1,
            Self::Booked => 2,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Booked => "booked",
        }
    }
}

impl fmt::Display for DeskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of resolving one desk at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Classified status.
    pub status: DeskStatus,
    /// Entry responsible for a non-available status.
    pub active_entry: Option<ScheduleEntry>,
    /// Earliest entry starting strictly after the reference instant.
    pub upcoming_entry: Option<ScheduleEntry>,
}

impl Resolution {
    /// The safe default: available, nothing active, nothing upcoming.
    pub fn available() -> Self {
        Self {
            status: DeskStatus::Available,
            active_entry: None,
            upcoming_entry: None,
        }
    }

    /// Shorthand for `status == Available`.
    pub fn is_available(&self) -> bool {
        self.status == DeskStatus::Available
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::available()
    }
}
