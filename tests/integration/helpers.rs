//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use deskbook_core::clock::{Clock, FixedClock};
use deskbook_core::config::AppConfig;
use deskbook_entity::DeskRecord;
use deskbook_entity::record::parse_timestamp;
use deskbook_service::{AvailabilityResolver, DeskKeyMap, DirectorySnapshot, FloorService};

/// Parse an RFC 3339 fixture timestamp
pub fn ts(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).expect("fixture timestamp")
}

/// Test configuration pointing the directory at `base_url`
pub fn config(base_url: &str) -> AppConfig {
    AppConfig::from_toml_str(&format!(
        r#"
        [directory]
        base_url = "{base_url}"
        api_token = "test-token"
        poll_interval_seconds = 1

        [[floor.desks]]
        key = "Table 1"
        location_id = "101"
        label = "Window"

        [[floor.desks]]
        key = "Table 2 UP"
        location_id = "102"

        [[floor.desks]]
        key = "Table 2 DOWN"
        location_id = "103"

        [[floor.desks]]
        key = "Table 3"
        location_id = "104"
        "#
    ))
    .expect("Failed to load test config")
}

/// The office directory as the desk API would return it
///
/// - 101: accepted booking 09:00-17:00 on 2025-01-10
/// - 102: pending booking 09:00-10:00 on 2025-01-11
/// - 103: declined booking around noon, plus a corrupt entry
/// - 104: open attendance since 11:30
/// - 999: a desk nobody mapped
pub fn directory_body() -> Value {
    json!([
        {
            "locationId": 101,
            "name": "Desk 101",
            "bookings": [
                {"id": "b-101", "status": "accepted", "start": "2025-01-10T09:00:00Z", "end": "2025-01-10T17:00:00Z", "userName": "ana"}
            ],
            "attendances": null
        },
        {
            "locationId": "102",
            "bookings": [
                {"id": "b-102", "status": "pending", "start": "2025-01-11T09:00:00Z", "end": "2025-01-11T10:00:00Z"}
            ]
        },
        {
            "locationId": "103",
            "bookings": [
                {"id": "b-103", "status": "declined", "start": "2025-01-10T11:00:00Z", "end": "2025-01-10T13:00:00Z"},
                {"id": "b-103-bad", "status": "accepted", "start": "lunchtime"}
            ]
        },
        {
            "locationId": "104",
            "attendances": [
                {"id": "a-104", "status": "active", "startTime": "2025-01-10T11:30:00Z"}
            ]
        },
        {
            "locationId": "999",
            "bookings": []
        }
    ])
}

/// Directory records parsed from [`directory_body`]
pub fn directory_records() -> Vec<DeskRecord> {
    serde_json::from_value(directory_body()).expect("fixture records")
}

/// Snapshot of [`directory_records`]
pub fn snapshot(fetched_at: DateTime<Utc>) -> DirectorySnapshot {
    DirectorySnapshot::from_records(directory_records(), fetched_at)
}

/// Floor service over the test config and a fixed clock
pub fn floor(config: &AppConfig, clock: Arc<FixedClock>) -> FloorService {
    let key_map = DeskKeyMap::from_config(&config.floor).expect("valid key map");
    let resolver = AvailabilityResolver::from_config(&config.resolver);
    let clock: Arc<dyn Clock> = clock;
    FloorService::new(key_map, resolver, clock)
}
