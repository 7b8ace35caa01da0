//! Availability resolver settings.

use serde::{Deserialize, Serialize};

/// How a booking without an `end` timestamp is treated.
///
/// Attendances without an end are always open-ended; bookings have no
/// agreed meaning upstream, so the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenEndedBookingPolicy {
    /// Drop the booking from consideration.
    #[default]
    Discard,
    /// Treat the booking as active from `start` onward, like an attendance.
    OpenEnded,
}

/// Resolver configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Treatment of bookings that have no end.
    #[serde(default)]
    pub open_ended_bookings: OpenEndedBookingPolicy,
}
