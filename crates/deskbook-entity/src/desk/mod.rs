//! Desk entity.

use serde::{Deserialize, Serialize};

use deskbook_core::types::{EntryId, LocationId};

use crate::schedule::ScheduleEntry;

/// A bookable physical desk and its schedule.
///
/// The schedule carries no ordering guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Desk {
    /// Backend identifier.
    pub location_id: LocationId,
    /// Backend display name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bookings and attendances.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

impl Desk {
    /// Create a desk with an empty schedule.
    pub fn new(location_id: impl Into<LocationId>) -> Self {
        Self {
            location_id: location_id.into(),
            name: None,
            schedule: Vec::new(),
        }
    }

    /// Builder-style schedule setter.
    pub fn with_schedule(mut self, schedule: Vec<ScheduleEntry>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Find an entry by id.
    pub fn entry(&self, id: &EntryId) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| &e.id == id)
    }
}
