//! # deskbook-service
//!
//! Availability resolution and the collaborators around it: the explicit
//! desk key map, the desk directory client and its poller, floor view
//! composition, and booking submission.
//!
//! Services follow constructor injection: the directory, submitter, and
//! clock are provided at construction time via `Arc` references.

pub mod booking;
pub mod desk_map;
pub mod directory;
pub mod floor;
pub mod poller;
pub mod resolver;

pub use booking::{BookingReceipt, BookingRequest, BookingService, BookingSubmitter, HttpBookingSubmitter};
pub use desk_map::DeskKeyMap;
pub use directory::{DeskDirectory, DirectorySnapshot, HttpDeskDirectory, MemoryDeskDirectory};
pub use floor::{DeskCell, FloorService, FloorSummary, FloorView, StatusChange};
pub use poller::{DirectoryPoller, PollerHandle, SnapshotReceiver};
pub use resolver::{AvailabilityResolver, Window, is_available, resolve_status};
