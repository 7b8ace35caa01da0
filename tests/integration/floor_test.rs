//! Integration tests for the live floor: HTTP directory, poller, booking.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deskbook_core::clock::{Clock, FixedClock};
use deskbook_core::error::ErrorKind;
use deskbook_core::types::DeskKey;
use deskbook_entity::{DeskStatus, EntryStatus};
use deskbook_service::{
    BookingRequest, BookingService, DeskDirectory, DirectoryPoller, HttpBookingSubmitter,
    HttpDeskDirectory,
};

use helpers::ts;

async fn mount_directory(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/desks"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_polled_directory_drives_floor() {
    let server = MockServer::start().await;
    mount_directory(&server, helpers::directory_body()).await;

    let config = helpers::config(&server.uri());
    let clock = Arc::new(FixedClock::new(ts("2025-01-10T12:00:00Z")));
    let floor = helpers::floor(&config, clock.clone());

    let directory: Arc<dyn DeskDirectory> =
        Arc::new(HttpDeskDirectory::new(&config.directory).expect("client"));
    let poller = DirectoryPoller::new(directory, clock.clone(), config.directory.poll_interval());

    let snapshot = poller.refresh_once().await.expect("first fetch");
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot.rejected_entries(), 1);
    assert_eq!(snapshot.fetched_at(), clock.now());

    let view = floor.render(&snapshot);
    assert_eq!(view.summary.booked, 2);
    assert_eq!(view.summary.available, 2);
    assert_eq!(view.summary.missing, 0);
}

#[tokio::test]
async fn test_directory_outage_keeps_stale_floor() {
    let server = MockServer::start().await;
    mount_directory(&server, helpers::directory_body()).await;

    let config = helpers::config(&server.uri());
    let clock = Arc::new(FixedClock::new(ts("2025-01-10T12:00:00Z")));
    let floor = helpers::floor(&config, clock.clone());

    let directory: Arc<dyn DeskDirectory> =
        Arc::new(HttpDeskDirectory::new(&config.directory).expect("client"));
    let poller = DirectoryPoller::new(directory, clock.clone(), config.directory.poll_interval());
    poller.refresh_once().await.expect("first fetch");

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    clock.advance(chrono::Duration::minutes(5));
    let err = poller.refresh_once().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert!(err.message.contains("503"));

    // Time moves on over the stale snapshot
    let stale = poller.latest().expect("stale snapshot");
    assert_eq!(stale.age(clock.now()), chrono::Duration::minutes(5));
    let view = floor.render(&stale);
    assert_eq!(
        view.cell(&DeskKey::from("Table 1")).and_then(|c| c.status()),
        Some(DeskStatus::Booked)
    );
}

#[tokio::test]
async fn test_booking_conflict_then_submit_and_refresh() {
    let server = MockServer::start().await;
    mount_directory(&server, helpers::directory_body()).await;

    let config = helpers::config(&server.uri());
    let clock = Arc::new(FixedClock::new(ts("2025-01-10T12:00:00Z")));
    let floor = helpers::floor(&config, clock.clone());

    let directory: Arc<dyn DeskDirectory> =
        Arc::new(HttpDeskDirectory::new(&config.directory).expect("client"));
    let poller = Arc::new(DirectoryPoller::new(
        directory,
        clock.clone(),
        Duration::from_secs(3600),
    ));
    let mut snapshots = poller.subscribe();
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let task = tokio::spawn({
        let poller = Arc::clone(&poller);
        async move { poller.run(cancel_rx).await }
    });

    snapshots.changed().await.expect("first snapshot");
    let snapshot = snapshots.borrow_and_update().clone().expect("snapshot");

    let submitter = Arc::new(HttpBookingSubmitter::new(&config.directory).expect("client"));
    let service =
        BookingService::new(submitter, *floor.resolver()).with_refresh(poller.handle());

    // Table 1 is taken all day
    let taken = floor
        .desk(&snapshot, &DeskKey::from("Table 1"))
        .expect("mapped desk");
    let err = service
        .submit(
            taken,
            BookingRequest {
                location_id: taken.location_id.clone(),
                start: ts("2025-01-10T10:00:00Z"),
                end: ts("2025-01-10T11:00:00Z"),
                note: None,
            },
            false,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("b-101"));

    // Table 2 DOWN only has a declined booking
    let mut updated = helpers::directory_body();
    updated[2]["bookings"]
        .as_array_mut()
        .expect("bookings")
        .push(json!({
            "id": "b-new",
            "status": "pending",
            "start": "2025-01-10T14:00:00Z",
            "end": "2025-01-10T15:00:00Z"
        }));
    server.reset().await;
    mount_directory(&server, updated).await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "b-new", "status": "pending"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let free = floor
        .desk(&snapshot, &DeskKey::from("Table 2 DOWN"))
        .expect("mapped desk");
    let receipt = service
        .submit(
            free,
            BookingRequest {
                location_id: free.location_id.clone(),
                start: ts("2025-01-10T14:00:00Z"),
                end: ts("2025-01-10T15:00:00Z"),
                note: Some("quiet corner please".to_string()),
            },
            false,
        )
        .await
        .expect("booking accepted");
    assert_eq!(receipt.status, EntryStatus::Pending);

    snapshots.changed().await.expect("refreshed snapshot");
    let refreshed = snapshots.borrow_and_update().clone().expect("snapshot");
    let view = floor.render_at(&refreshed, ts("2025-01-10T14:30:00Z"));
    assert_eq!(
        view.cell(&DeskKey::from("Table 2 DOWN")).and_then(|c| c.status()),
        Some(DeskStatus::Pending)
    );

    cancel_tx.send(true).expect("poller alive");
    task.await.expect("poller task");
}
