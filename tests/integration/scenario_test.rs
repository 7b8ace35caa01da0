//! End-to-end availability scenarios: desk API JSON through to floor cells.

mod helpers;

use std::sync::Arc;

use deskbook_core::clock::{Clock, FixedClock};
use deskbook_core::types::{DeskKey, EntryId, LocationId};
use deskbook_entity::{DeskStatus, EntryKind};
use deskbook_service::{AvailabilityResolver, resolve_status};

use helpers::ts;

#[test]
fn test_accepted_booking_books_desk_during_window() {
    let snapshot = helpers::snapshot(ts("2025-01-10T12:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("101")).expect("desk 101");

    let resolution = resolve_status(desk, ts("2025-01-10T12:00:00Z"));
    assert_eq!(resolution.status, DeskStatus::Booked);
    let active = resolution.active_entry.expect("active booking");
    assert_eq!(active.id, EntryId::from("b-101"));
    assert_eq!(active.kind, EntryKind::Booking);
    assert_eq!(active.holder.as_deref(), Some("ana"));
}

#[test]
fn test_desk_frees_up_after_booking_ends() {
    let snapshot = helpers::snapshot(ts("2025-01-10T18:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("101")).expect("desk 101");

    let resolution = resolve_status(desk, ts("2025-01-10T18:00:00Z"));
    assert_eq!(resolution.status, DeskStatus::Available);
    assert!(resolution.active_entry.is_none());
    assert!(resolution.upcoming_entry.is_none());

    // Inclusive end
    assert_eq!(
        resolve_status(desk, ts("2025-01-10T17:00:00Z")).status,
        DeskStatus::Booked
    );
}

#[test]
fn test_future_pending_booking_is_upcoming_only() {
    let snapshot = helpers::snapshot(ts("2025-01-10T12:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("102")).expect("desk 102");

    let resolution = resolve_status(desk, ts("2025-01-10T12:00:00Z"));
    assert_eq!(resolution.status, DeskStatus::Available);
    assert_eq!(
        resolution.upcoming_entry.map(|e| e.id),
        Some(EntryId::from("b-102"))
    );

    assert_eq!(
        resolve_status(desk, ts("2025-01-11T09:30:00Z")).status,
        DeskStatus::Pending
    );
}

#[test]
fn test_declined_booking_never_blocks() {
    let snapshot = helpers::snapshot(ts("2025-01-10T12:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("103")).expect("desk 103");

    // The corrupt sibling entry was dropped at conversion
    assert_eq!(desk.schedule.len(), 1);
    assert_eq!(snapshot.rejected_entries(), 1);

    let resolution = resolve_status(desk, ts("2025-01-10T12:00:00Z"));
    assert_eq!(resolution.status, DeskStatus::Available);
    assert!(resolution.active_entry.is_none());
}

#[test]
fn test_open_attendance_books_desk_from_its_start() {
    let snapshot = helpers::snapshot(ts("2025-01-10T12:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("104")).expect("desk 104");

    let now = ts("2025-01-10T12:00:00Z");
    assert_eq!(resolve_status(desk, now).status, DeskStatus::Booked);

    let before = resolve_status(desk, now - chrono::Duration::hours(1));
    assert_eq!(before.status, DeskStatus::Available);
    assert_eq!(
        before.upcoming_entry.map(|e| e.id),
        Some(EntryId::from("a-104"))
    );

    // Still occupied far into the future
    assert_eq!(
        resolve_status(desk, ts("2030-01-01T00:00:00Z")).status,
        DeskStatus::Booked
    );
}

#[test]
fn test_unparsable_reference_time_reports_available() {
    let snapshot = helpers::snapshot(ts("2025-01-10T12:00:00Z"));
    let desk = snapshot.desk(&LocationId::from("101")).expect("desk 101");

    let resolution = AvailabilityResolver::default().resolve_raw(desk, "noon-ish");
    assert!(resolution.is_available());
    assert!(resolution.active_entry.is_none());

    let resolution = AvailabilityResolver::default().resolve_raw(desk, "2025-01-10T12:00:00Z");
    assert_eq!(resolution.status, DeskStatus::Booked);
}

#[test]
fn test_floor_renders_every_mapped_desk() {
    let config = helpers::config("http://localhost");
    let clock = Arc::new(FixedClock::new(ts("2025-01-10T12:00:00Z")));
    let floor = helpers::floor(&config, clock.clone());
    let snapshot = helpers::snapshot(clock.now());

    let view = floor.render(&snapshot);
    let statuses: Vec<(&str, Option<DeskStatus>)> = view
        .cells
        .iter()
        .map(|c| (c.key.as_str(), c.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("Table 1", Some(DeskStatus::Booked)),
            ("Table 2 UP", Some(DeskStatus::Available)),
            ("Table 2 DOWN", Some(DeskStatus::Available)),
            ("Table 3", Some(DeskStatus::Booked)),
        ]
    );
    assert_eq!(view.summary.booked, 2);
    assert_eq!(view.summary.available, 2);
    assert_eq!(view.unmapped, vec![LocationId::from("999")]);
    assert_eq!(
        view.cell(&DeskKey::from("Table 1")).map(|c| c.label.as_str()),
        Some("Window")
    );

    // Search mode: the next morning
    let tomorrow = floor.render_at(&snapshot, ts("2025-01-11T09:30:00Z"));
    assert_eq!(
        tomorrow.cell(&DeskKey::from("Table 2 UP")).and_then(|c| c.status()),
        Some(DeskStatus::Pending)
    );
    assert_eq!(
        tomorrow.cell(&DeskKey::from("Table 1")).and_then(|c| c.status()),
        Some(DeskStatus::Available)
    );
}

#[test]
fn test_clock_advance_reports_status_changes() {
    let config = helpers::config("http://localhost");
    let clock = Arc::new(FixedClock::new(ts("2025-01-10T16:59:00Z")));
    let floor = helpers::floor(&config, clock.clone());
    let snapshot = helpers::snapshot(clock.now());

    let before = floor.render(&snapshot);
    clock.advance(chrono::Duration::minutes(2));
    let after = floor.render(&snapshot);

    let changes = after.changes_since(&before);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].key, DeskKey::from("Table 1"));
    assert_eq!(changes[0].from, Some(DeskStatus::Booked));
    assert_eq!(changes[0].to, Some(DeskStatus::Available));
}

#[test]
fn test_minute_precision_upstream_and_reference_times() {
    let record: deskbook_entity::DeskRecord = serde_json::from_value(serde_json::json!({
        "locationId": "201",
        "bookings": [
            {"id": "b-201", "status": "accepted", "start": "2025-01-10T09:00Z", "end": "2025-01-10T17:00Z"},
            {"id": "b-202", "status": "pending", "start": "2025-01-11T09:00Z", "end": "2025-01-11T10:00Z"}
        ]
    }))
    .expect("record");
    let conversion = record.into_desk();
    assert!(conversion.rejected.is_empty());
    let desk = conversion.desk;
    let resolver = AvailabilityResolver::default();

    let noon = resolver.resolve_raw(&desk, "2025-01-10T12:00Z");
    assert_eq!(noon.status, DeskStatus::Booked);
    assert_eq!(noon.active_entry.map(|e| e.id), Some(EntryId::from("b-201")));

    let evening = resolver.resolve_raw(&desk, "2025-01-10T18:00Z");
    assert_eq!(evening.status, DeskStatus::Available);
    assert_eq!(
        evening.upcoming_entry.map(|e| e.id),
        Some(EntryId::from("b-202"))
    );
}
