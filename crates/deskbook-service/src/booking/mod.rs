//! Booking submission with a conflict pre-check.

pub mod http;

pub use http::HttpBookingSubmitter;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskbook_core::error::AppError;
use deskbook_core::result::AppResult;
use deskbook_core::types::{EntryId, LocationId};
use deskbook_entity::{Desk, EntryStatus, ScheduleEntry};

use crate::poller::PollerHandle;
use crate::resolver::AvailabilityResolver;

/// A new booking to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Desk to book.
    pub location_id: LocationId,
    /// Start of the reservation.
    pub start: DateTime<Utc>,
    /// End of the reservation.
    pub end: DateTime<Utc>,
    /// Free-form note for the approver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BookingRequest {
    /// Check that the window is well formed.
    pub fn validate(&self) -> AppResult<()> {
        if self.end <= self.start {
            return Err(AppError::validation(format!(
                "Booking end {} must be after start {}",
                self.end.to_rfc3339(),
                self.start.to_rfc3339()
            )));
        }
        Ok(())
    }
}

/// What the API said about a submitted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingReceipt {
    /// Id assigned upstream, if returned.
    pub id: Option<EntryId>,
    /// Status assigned upstream; new bookings normally await approval.
    pub status: EntryStatus,
}

/// Sends booking requests to the desk API.
#[async_trait]
pub trait BookingSubmitter: Send + Sync + 'static {
    /// Submit one booking.
    async fn submit(&self, request: &BookingRequest) -> AppResult<BookingReceipt>;
}

/// Entries of `desk` that would still occupy it somewhere in `[start, end]`.
pub fn find_conflicts<'a>(
    resolver: &AvailabilityResolver,
    desk: &'a Desk,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<&'a ScheduleEntry> {
    let mut conflicts: Vec<&ScheduleEntry> = desk
        .schedule
        .iter()
        .filter(|entry| {
            resolver
                .effective_window(entry)
                .is_some_and(|window| window.overlaps(start, end))
        })
        .collect();
    conflicts.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    conflicts
}

/// Validates, conflict-checks, and submits bookings.
pub struct BookingService {
    submitter: Arc<dyn BookingSubmitter>,
    resolver: AvailabilityResolver,
    refresh: Option<PollerHandle>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(submitter: Arc<dyn BookingSubmitter>, resolver: AvailabilityResolver) -> Self {
        Self {
            submitter,
            resolver,
            refresh: None,
        }
    }

    /// Ask `poller` for a directory refresh after each accepted submission.
    pub fn with_refresh(mut self, poller: PollerHandle) -> Self {
        self.refresh = Some(poller);
        self
    }

    /// Submit `request` for `desk`.
    ///
    /// Fails with `Validation` for a malformed window or a mismatched desk,
    /// and with `Conflict` when the window collides with existing entries
    /// unless `force` is set.
    pub async fn submit(
        &self,
        desk: &Desk,
        request: BookingRequest,
        force: bool,
    ) -> AppResult<BookingReceipt> {
        request.validate()?;

        if request.location_id != desk.location_id {
            return Err(AppError::validation(format!(
                "Booking targets '{}' but desk is '{}'",
                request.location_id, desk.location_id
            )));
        }

        let conflicts = find_conflicts(&self.resolver, desk, request.start, request.end);
        if !conflicts.is_empty() {
            let ids: Vec<&str> = conflicts.iter().map(|e| e.id.as_str()).collect();
            if !force {
                return Err(AppError::conflict(format!(
                    "Desk '{}' is already taken in that window by {}",
                    desk.location_id,
                    ids.join(", ")
                )));
            }
            tracing::warn!(
                desk = %desk.location_id,
                conflicts = ?ids,
                "Submitting booking despite conflicts"
            );
        }

        let receipt = self.submitter.submit(&request).await?;
        tracing::info!(
            desk = %request.location_id,
            start = %request.start.to_rfc3339(),
            end = %request.end.to_rfc3339(),
            id = receipt.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
            status = %receipt.status,
            "Booking submitted"
        );

        if let Some(refresh) = &self.refresh {
            refresh.request_refresh();
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use deskbook_core::config::OpenEndedBookingPolicy;
    use deskbook_core::error::ErrorKind;
    use tokio::sync::Mutex;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, h, 0, 0).unwrap()
    }

    #[derive(Default)]
    struct RecordingSubmitter {
        submitted: Mutex<Vec<BookingRequest>>,
    }

    #[async_trait]
    impl BookingSubmitter for RecordingSubmitter {
        async fn submit(&self, request: &BookingRequest) -> AppResult<BookingReceipt> {
            self.submitted.lock().await.push(request.clone());
            Ok(BookingReceipt {
                id: Some(EntryId::from("new-1")),
                status: EntryStatus::Pending,
            })
        }
    }

    fn desk() -> Desk {
        Desk::new("loc-1").with_schedule(vec![
            ScheduleEntry::booking("morning", EntryStatus::Accepted, at(8), at(10)),
            ScheduleEntry::booking("declined", EntryStatus::Declined, at(11), at(12)),
            ScheduleEntry::attendance("walk-in", EntryStatus::Active, at(15), None),
        ])
    }

    fn request(start: u32, end: u32) -> BookingRequest {
        BookingRequest {
            location_id: LocationId::from("loc-1"),
            start: at(start),
            end: at(end),
            note: None,
        }
    }

    #[test]
    fn test_find_conflicts() {
        let resolver = AvailabilityResolver::default();
        let desk = desk();

        let ids = |start, end| -> Vec<String> {
            find_conflicts(&resolver, &desk, at(start), at(end))
                .into_iter()
                .map(|e| e.id.to_string())
                .collect()
        };

        assert_eq!(ids(9, 11), vec!["morning"]);
        assert!(ids(11, 12).is_empty());
        assert_eq!(ids(10, 16), vec!["morning", "walk-in"]);
        assert_eq!(ids(20, 21), vec!["walk-in"]);
    }

    #[test]
    fn test_open_booking_conflicts_only_when_open_ended() {
        let open = ScheduleEntry {
            end: None,
            ..ScheduleEntry::booking("open", EntryStatus::Accepted, at(9), at(9))
        };
        let desk = Desk::new("loc-1").with_schedule(vec![open]);

        let discard = AvailabilityResolver::new(OpenEndedBookingPolicy::Discard);
        assert!(find_conflicts(&discard, &desk, at(12), at(13)).is_empty());

        let open_ended = AvailabilityResolver::new(OpenEndedBookingPolicy::OpenEnded);
        assert_eq!(find_conflicts(&open_ended, &desk, at(12), at(13)).len(), 1);
    }

    #[tokio::test]
    async fn test_submit_free_window() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let service = BookingService::new(submitter.clone(), AvailabilityResolver::default());

        let receipt = service
            .submit(&desk(), request(11, 12), false)
            .await
            .expect("submitted");

        assert_eq!(receipt.id, Some(EntryId::from("new-1")));
        assert_eq!(submitter.submitted.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_conflict_blocks_unless_forced() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let service = BookingService::new(submitter.clone(), AvailabilityResolver::default());

        let err = service
            .submit(&desk(), request(9, 11), false)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("morning"));
        assert!(submitter.submitted.lock().await.is_empty());

        service
            .submit(&desk(), request(9, 11), true)
            .await
            .expect("forced");
        assert_eq!(submitter.submitted.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let service = BookingService::new(
            Arc::new(RecordingSubmitter::default()),
            AvailabilityResolver::default(),
        );

        let err = service.submit(&desk(), request(12, 12), false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut other = request(11, 12);
        other.location_id = LocationId::from("loc-2");
        let err = service.submit(&desk(), other, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
