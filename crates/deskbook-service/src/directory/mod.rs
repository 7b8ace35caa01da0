//! Desk directory: fetching desk records from the remote API.

pub mod http;
pub mod memory;
pub mod snapshot;

pub use http::HttpDeskDirectory;
pub use memory::MemoryDeskDirectory;
pub use snapshot::DirectorySnapshot;

use async_trait::async_trait;

use deskbook_core::result::AppResult;
use deskbook_entity::DeskRecord;

/// Source of raw desk records.
///
/// Implementations return the full desk list on every call; there is no
/// incremental or push channel.
#[async_trait]
pub trait DeskDirectory: Send + Sync + 'static {
    /// Fetch every desk with its bookings and attendances.
    async fn fetch_desks(&self) -> AppResult<Vec<DeskRecord>>;
}
