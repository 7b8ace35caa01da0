//! Immutable view of the desk directory at one fetch.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use deskbook_core::types::LocationId;
use deskbook_entity::{Desk, DeskRecord};

/// Typed desks from one directory fetch.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    desks: BTreeMap<LocationId, Desk>,
    rejected_entries: usize,
    fetched_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    /// Convert raw records, logging every rejected schedule entry.
    ///
    /// When two records share a `locationId` the later one wins.
    pub fn from_records(records: Vec<DeskRecord>, fetched_at: DateTime<Utc>) -> Self {
        let mut desks = Vec::with_capacity(records.len());
        let mut rejected_entries = 0;

        for record in records {
            let conversion = record.into_desk();
            for rejected in &conversion.rejected {
                tracing::warn!(
                    desk = %conversion.desk.location_id,
                    kind = %rejected.kind,
                    index = rejected.index,
                    entry = rejected.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
                    reason = %rejected.reason,
                    "Excluding malformed schedule entry"
                );
            }
            rejected_entries += conversion.rejected.len();
            desks.push(conversion.desk);
        }

        Self::from_desks(desks, rejected_entries, fetched_at)
    }

    /// Build a snapshot from already typed desks.
    pub fn from_desks(desks: Vec<Desk>, rejected_entries: usize, fetched_at: DateTime<Utc>) -> Self {
        let mut by_location = BTreeMap::new();
        for desk in desks {
            if let Some(previous) = by_location.insert(desk.location_id.clone(), desk) {
                tracing::warn!(
                    desk = %previous.location_id,
                    "Directory listed the same location twice, keeping the later record"
                );
            }
        }

        Self {
            desks: by_location,
            rejected_entries,
            fetched_at,
        }
    }

    /// The desk at `location`, if listed.
    pub fn desk(&self, location: &LocationId) -> Option<&Desk> {
        self.desks.get(location)
    }

    /// All desks ordered by location id.
    pub fn desks(&self) -> impl Iterator<Item = &Desk> {
        self.desks.values()
    }

    /// Number of desks.
    pub fn len(&self) -> usize {
        self.desks.len()
    }

    /// Whether the snapshot has no desks.
    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    /// Schedule entries dropped as malformed while building the snapshot.
    pub fn rejected_entries(&self) -> usize {
        self.rejected_entries
    }

    /// When the directory was fetched.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// How old the snapshot is at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }
}
