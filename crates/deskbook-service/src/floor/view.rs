//! Rendered floor: one cell per mapped desk.

use chrono::{DateTime, Utc};
use serde::Serialize;

use deskbook_core::types::{DeskKey, LocationId};
use deskbook_entity::{DeskStatus, Resolution};

/// One desk on the floor plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeskCell {
    /// Floor plan key.
    pub key: DeskKey,
    /// Display label (mapping label, backend name, or the key).
    pub label: String,
    /// Backend location.
    pub location_id: LocationId,
    /// `None` when the mapped desk is absent from the snapshot.
    pub resolution: Option<Resolution>,
}

impl DeskCell {
    /// The cell's status, if the desk was found.
    pub fn status(&self) -> Option<DeskStatus> {
        self.resolution.as_ref().map(|r| r.status)
    }

    /// Whether the cell should be drawn as free.
    pub fn is_available(&self) -> bool {
        self.status() == Some(DeskStatus::Available)
    }
}

/// Counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FloorSummary {
    /// Available desks.
    pub available: usize,
    /// Desks with a pending entry in effect.
    pub pending: usize,
    /// Booked or occupied desks.
    pub booked: usize,
    /// Mapped desks missing from the directory.
    pub missing: usize,
}

impl FloorSummary {
    fn record(&mut self, status: Option<DeskStatus>) {
        match status {
            Some(DeskStatus::Available) => self.available += 1,
            Some(DeskStatus::Pending) => self.pending += 1,
            Some(DeskStatus::Booked) => self.booked += 1,
            None => self.missing += 1,
        }
    }
}

/// A desk whose status differs between two renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// Floor plan key.
    pub key: DeskKey,
    /// Previous status (`None`: missing or not rendered before).
    pub from: Option<DeskStatus>,
    /// New status (`None`: missing).
    pub to: Option<DeskStatus>,
}

/// The whole floor at one reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorView {
    /// Instant the floor was resolved at.
    pub reference_time: DateTime<Utc>,
    /// Cells in floor plan order.
    pub cells: Vec<DeskCell>,
    /// Status counts.
    pub summary: FloorSummary,
    /// Snapshot desks with no floor plan key.
    pub unmapped: Vec<LocationId>,
}

impl FloorView {
    /// Assemble a view, computing the summary.
    pub fn new(reference_time: DateTime<Utc>, cells: Vec<DeskCell>, unmapped: Vec<LocationId>) -> Self {
        let mut summary = FloorSummary::default();
        for cell in &cells {
            summary.record(cell.status());
        }
        Self {
            reference_time,
            cells,
            summary,
            unmapped,
        }
    }

    /// Cell for a desk key.
    pub fn cell(&self, key: &DeskKey) -> Option<&DeskCell> {
        self.cells.iter().find(|c| &c.key == key)
    }

    /// Desks whose status differs from `previous`.
    pub fn changes_since(&self, previous: &FloorView) -> Vec<StatusChange> {
        self.cells
            .iter()
            .filter_map(|cell| {
                let from = previous.cell(&cell.key).and_then(DeskCell::status);
                let to = cell.status();
                (from != to).then(|| StatusChange {
                    key: cell.key.clone(),
                    from,
                    to,
                })
            })
            .collect()
    }
}
