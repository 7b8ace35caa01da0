//! Availability resolver.
//!
//! Classifies a desk as available, pending, or booked at a reference
//! instant, and picks the entry responsible plus the next one coming up.
//! Pure and synchronous: every call reads an immutable desk snapshot and
//! returns a fresh [`Resolution`].
//!
//! Selection of the active entry among several that contain the instant:
//! 1. attendance over booking,
//! 2. busier status over less busy (`booked` over `pending`),
//! 3. latest `start`,
//! 4. greatest entry id,
//! 5. latest `end` (open-ended counts as latest),
//! 6. greatest holder.
//!
//! The upcoming entry is the earliest `start`, then attendance over
//! booking, then smallest id, then earliest `end` (open-ended last), then
//! smallest holder.
//!
//! Upstream data may contain overlapping accepted bookings and repeated
//! ids; both orders are total over everything an entry reports, so the
//! result is independent of schedule order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use deskbook_core::config::{OpenEndedBookingPolicy, ResolverConfig};
use deskbook_entity::record::parse_timestamp;
use deskbook_entity::{Desk, DeskStatus, EntryKind, Resolution, ScheduleEntry};

/// The span of time during which an entry occupies its desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First instant covered.
    pub start: DateTime<Utc>,
    /// Last instant covered; `None` means forever.
    pub end: Option<DateTime<Utc>>,
}

impl Window {
    /// Whether `at` lies in `[start, end]`, both bounds inclusive.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && self.end.is_none_or(|end| at <= end)
    }

    /// Whether this window intersects `[start, end]` (inclusive).
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= end && self.end.is_none_or(|own_end| own_end >= start)
    }
}

/// Resolves desk availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailabilityResolver {
    open_ended_bookings: OpenEndedBookingPolicy,
}

impl AvailabilityResolver {
    /// Create a resolver with an explicit open-ended booking policy.
    pub fn new(open_ended_bookings: OpenEndedBookingPolicy) -> Self {
        Self {
            open_ended_bookings,
        }
    }

    /// Create a resolver from the `[resolver]` config section.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.open_ended_bookings)
    }

    /// The configured treatment of bookings without an end.
    pub fn open_ended_bookings(&self) -> OpenEndedBookingPolicy {
        self.open_ended_bookings
    }

    /// The window an entry occupies, or `None` if it must be ignored.
    ///
    /// Ignored entries are declined/completed ones, entries ending before
    /// they start, and (under [`OpenEndedBookingPolicy::Discard`]) bookings
    /// with no end.
    pub fn effective_window(&self, entry: &ScheduleEntry) -> Option<Window> {
        if entry.status.is_inert() {
            return None;
        }

        match entry.end {
            Some(end) if end < entry.start => None,
            Some(end) => Some(Window {
                start: entry.start,
                end: Some(end),
            }),
            None => match (entry.kind, self.open_ended_bookings) {
                (EntryKind::Attendance, _) | (EntryKind::Booking, OpenEndedBookingPolicy::OpenEnded) => {
                    Some(Window {
                        start: entry.start,
                        end: None,
                    })
                }
                (EntryKind::Booking, OpenEndedBookingPolicy::Discard) => None,
            },
        }
    }

    /// Classify `desk` at `at`.
    pub fn resolve(&self, desk: &Desk, at: DateTime<Utc>) -> Resolution {
        let mut active: Option<&ScheduleEntry> = None;
        let mut upcoming: Option<&ScheduleEntry> = None;

        for entry in &desk.schedule {
            let Some(window) = self.effective_window(entry) else {
                continue;
            };

            if window.contains(at) && active.is_none_or(|current| outranks(entry, current)) {
                active = Some(entry);
            }

            if entry.start > at && upcoming.is_none_or(|current| starts_sooner(entry, current)) {
                upcoming = Some(entry);
            }
        }

        let status = active
            .and_then(|entry| entry.status.occupancy())
            .unwrap_or(DeskStatus::Available);

        Resolution {
            status,
            active_entry: active.cloned(),
            upcoming_entry: upcoming.cloned(),
        }
    }

    /// `true` iff the desk resolves to [`DeskStatus::Available`] at `at`.
    pub fn is_available(&self, desk: &Desk, at: DateTime<Utc>) -> bool {
        self.resolve(desk, at).is_available()
    }

    /// Classify `desk` at a reference time given as text.
    ///
    /// An unparsable reference yields [`Resolution::available`] and a
    /// warning; it never fails.
    pub fn resolve_raw(&self, desk: &Desk, reference: &str) -> Resolution {
        match parse_timestamp(reference) {
            Some(at) => self.resolve(desk, at),
            None => {
                tracing::warn!(
                    desk = %desk.location_id,
                    reference,
                    "Invalid reference time, reporting desk as available"
                );
                Resolution::available()
            }
        }
    }
}

/// Classify `desk` at `at` with the default policy.
pub fn resolve_status(desk: &Desk, at: DateTime<Utc>) -> Resolution {
    AvailabilityResolver::default().resolve(desk, at)
}

/// `true` iff `desk` is available at `at` under the default policy.
pub fn is_available(desk: &Desk, at: DateTime<Utc>) -> bool {
    AvailabilityResolver::default().is_available(desk, at)
}

type ActiveRank<'a> = (u8, u8, DateTime<Utc>, &'a str, EndKey, Option<&'a str>);

/// Orders ends with open-ended after every finite end.
type EndKey = (bool, Option<DateTime<Utc>>);

fn end_key(entry: &ScheduleEntry) -> EndKey {
    (entry.end.is_none(), entry.end)
}

fn active_rank(entry: &ScheduleEntry) -> ActiveRank<'_> {
    let severity = entry.status.occupancy().map_or(0, |status| status.severity());
    (
        entry.kind.priority(),
        severity,
        entry.start,
        entry.id.as_str(),
        end_key(entry),
        entry.holder.as_deref(),
    )
}

fn outranks(candidate: &ScheduleEntry, current: &ScheduleEntry) -> bool {
    active_rank(candidate) > active_rank(current)
}

fn starts_sooner(candidate: &ScheduleEntry, current: &ScheduleEntry) -> bool {
    candidate
        .start
        .cmp(&current.start)
        .then_with(|| current.kind.priority().cmp(&candidate.kind.priority()))
        .then_with(|| candidate.id.cmp(&current.id))
        .then_with(|| end_key(candidate).cmp(&end_key(current)))
        .then_with(|| candidate.holder.cmp(&current.holder))
        == Ordering::Less
}
