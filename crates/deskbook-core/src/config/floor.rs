//! Floor plan configuration: the desk identifier mapping table.

use serde::{Deserialize, Serialize};

use crate::types::id::{DeskKey, LocationId};

/// Floor plan rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Seconds between floor re-renders in the monitor.
    #[serde(default = "default_render_interval")]
    pub render_interval_seconds: u64,
    /// UI desk key to backend location mapping.
    #[serde(default)]
    pub desks: Vec<DeskMapping>,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            render_interval_seconds: default_render_interval(),
            desks: Vec::new(),
        }
    }
}

/// One row of the identifier mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskMapping {
    /// Name used by the floor plan.
    pub key: DeskKey,
    /// Backend `locationId` of the same physical desk.
    pub location_id: LocationId,
    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_render_interval() -> u64 {
    1
}
