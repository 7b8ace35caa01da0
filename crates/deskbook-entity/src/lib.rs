//! # deskbook-entity
//!
//! Domain entity models for DeskBook. Desks and their schedule entries are
//! read-only projections of the remote desk API; [`record`] holds the
//! lenient wire format and its conversion into typed entities.

pub mod availability;
pub mod desk;
pub mod record;
pub mod schedule;

pub use availability::{DeskStatus, Resolution};
pub use desk::Desk;
pub use record::{DeskConversion, DeskRecord, RejectedEntry};
pub use schedule::{EntryKind, EntryStatus, ScheduleEntry};
