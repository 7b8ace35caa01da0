//! Explicit mapping between floor plan desk keys and backend locations.
//!
//! The floor plan names desks (`"Table 2 UP"`) independently of the
//! backend (`locationId`). The two are related only through this table;
//! lookups are exact, never by substring.

use std::collections::HashMap;

use deskbook_core::config::{DeskMapping, FloorConfig};
use deskbook_core::error::AppError;
use deskbook_core::types::{DeskKey, LocationId};
use deskbook_entity::Desk;

use crate::directory::DirectorySnapshot;

/// Bidirectional, ordered desk key ↔ location table.
#[derive(Debug, Clone, Default)]
pub struct DeskKeyMap {
    /// Rows in floor plan order.
    entries: Vec<DeskMapping>,
    by_key: HashMap<DeskKey, usize>,
    by_location: HashMap<LocationId, usize>,
}

impl DeskKeyMap {
    /// Build a map from mapping rows, rejecting duplicate keys or locations.
    pub fn new(mappings: impl IntoIterator<Item = DeskMapping>) -> Result<Self, AppError> {
        let mut map = Self::default();
        for mapping in mappings {
            map.insert(mapping)?;
        }
        Ok(map)
    }

    /// Build a map from the `[floor]` config section.
    pub fn from_config(config: &FloorConfig) -> Result<Self, AppError> {
        Self::new(config.desks.iter().cloned())
    }

    /// Add one row.
    pub fn insert(&mut self, mapping: DeskMapping) -> Result<(), AppError> {
        if self.by_key.contains_key(&mapping.key) {
            return Err(AppError::validation(format!(
                "Desk key '{}' is already mapped",
                mapping.key
            )));
        }
        if let Some(&existing) = self.by_location.get(&mapping.location_id) {
            return Err(AppError::validation(format!(
                "Location '{}' is already mapped to '{}'",
                mapping.location_id, self.entries[existing].key
            )));
        }

        let index = self.entries.len();
        self.by_key.insert(mapping.key.clone(), index);
        self.by_location.insert(mapping.location_id.clone(), index);
        self.entries.push(mapping);
        Ok(())
    }

    /// Backend location for a desk key.
    pub fn location_of(&self, key: &DeskKey) -> Option<&LocationId> {
        self.mapping(key).map(|m| &m.location_id)
    }

    /// Desk key for a backend location.
    pub fn key_of(&self, location: &LocationId) -> Option<&DeskKey> {
        self.by_location
            .get(location)
            .map(|&index| &self.entries[index].key)
    }

    /// Full mapping row for a desk key.
    pub fn mapping(&self, key: &DeskKey) -> Option<&DeskMapping> {
        self.by_key.get(key).map(|&index| &self.entries[index])
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DeskMapping> {
        self.entries.iter()
    }

    /// Number of mapped desks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot desk behind a desk key.
    pub fn lookup<'a>(&self, snapshot: &'a DirectorySnapshot, key: &DeskKey) -> Option<&'a Desk> {
        self.location_of(key)
            .and_then(|location| snapshot.desk(location))
    }

    /// Snapshot desks that no floor plan key points at.
    pub fn unmapped(&self, snapshot: &DirectorySnapshot) -> Vec<LocationId> {
        snapshot
            .desks()
            .filter(|desk| !self.by_location.contains_key(&desk.location_id))
            .map(|desk| desk.location_id.clone())
            .collect()
    }
}
