//! Floor view composition: key map + snapshot + resolver + clock.

pub mod view;

pub use view::{DeskCell, FloorSummary, FloorView, StatusChange};

use std::sync::Arc;

use chrono::{DateTime, Utc};

use deskbook_core::clock::Clock;
use deskbook_core::config::DeskMapping;
use deskbook_core::error::AppError;
use deskbook_core::types::DeskKey;
use deskbook_entity::Desk;

use crate::desk_map::DeskKeyMap;
use crate::directory::DirectorySnapshot;
use crate::resolver::AvailabilityResolver;

/// Renders the floor plan from directory snapshots.
#[derive(Debug, Clone)]
pub struct FloorService {
    key_map: DeskKeyMap,
    resolver: AvailabilityResolver,
    clock: Arc<dyn Clock>,
}

impl FloorService {
    /// Creates a new floor service.
    pub fn new(key_map: DeskKeyMap, resolver: AvailabilityResolver, clock: Arc<dyn Clock>) -> Self {
        Self {
            key_map,
            resolver,
            clock,
        }
    }

    /// The desk key map in use.
    pub fn key_map(&self) -> &DeskKeyMap {
        &self.key_map
    }

    /// The resolver in use.
    pub fn resolver(&self) -> &AvailabilityResolver {
        &self.resolver
    }

    /// The current instant according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Live mode: resolve every mapped desk at the clock's current instant.
    pub fn render(&self, snapshot: &DirectorySnapshot) -> FloorView {
        self.render_at(snapshot, self.clock.now())
    }

    /// Search mode: resolve every mapped desk at `at`.
    pub fn render_at(&self, snapshot: &DirectorySnapshot, at: DateTime<Utc>) -> FloorView {
        let cells = self
            .key_map
            .iter()
            .map(|mapping| self.build_cell(mapping, snapshot.desk(&mapping.location_id), at))
            .collect();

        FloorView::new(at, cells, self.key_map.unmapped(snapshot))
    }

    /// Resolve a single desk by key.
    pub fn cell(
        &self,
        snapshot: &DirectorySnapshot,
        key: &DeskKey,
        at: DateTime<Utc>,
    ) -> Result<DeskCell, AppError> {
        let mapping = self
            .key_map
            .mapping(key)
            .ok_or_else(|| AppError::not_found(format!("Unknown desk '{key}'")))?;
        Ok(self.build_cell(mapping, snapshot.desk(&mapping.location_id), at))
    }

    /// The snapshot desk behind `key`, or `NotFound`.
    pub fn desk<'a>(&self, snapshot: &'a DirectorySnapshot, key: &DeskKey) -> Result<&'a Desk, AppError> {
        let location = self
            .key_map
            .location_of(key)
            .ok_or_else(|| AppError::not_found(format!("Unknown desk '{key}'")))?;
        snapshot.desk(location).ok_or_else(|| {
            AppError::not_found(format!(
                "Desk '{key}' (location '{location}') is not in the directory"
            ))
        })
    }

    fn build_cell(&self, mapping: &DeskMapping, desk: Option<&Desk>, at: DateTime<Utc>) -> DeskCell {
        let label = mapping
            .label
            .clone()
            .or_else(|| desk.and_then(|d| d.name.clone()))
            .unwrap_or_else(|| mapping.key.to_string());

        DeskCell {
            key: mapping.key.clone(),
            label,
            location_id: mapping.location_id.clone(),
            resolution: desk.map(|d| self.resolver.resolve(d, at)),
        }
    }
}
