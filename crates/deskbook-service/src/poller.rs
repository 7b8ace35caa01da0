//! Background directory refresher.
//!
//! Re-fetches the whole desk list on a fixed interval, and on demand after
//! a booking submission, publishing each snapshot on a watch channel. A
//! failed fetch leaves the previous snapshot published.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::time::{self, MissedTickBehavior};

use deskbook_core::clock::Clock;
use deskbook_core::result::AppResult;

use crate::directory::{DeskDirectory, DirectorySnapshot};

/// Latest published snapshot; `None` until the first successful fetch.
pub type SnapshotReceiver = watch::Receiver<Option<Arc<DirectorySnapshot>>>;

/// Cloneable handle used to ask a running poller for an immediate refresh.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    refresh: Arc<Notify>,
}

impl PollerHandle {
    /// Request a refresh ahead of the next interval tick.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }
}

/// Polls a [`DeskDirectory`] and publishes [`DirectorySnapshot`]s.
pub struct DirectoryPoller {
    directory: Arc<dyn DeskDirectory>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    refresh: Arc<Notify>,
    snapshot_tx: watch::Sender<Option<Arc<DirectorySnapshot>>>,
}

impl DirectoryPoller {
    /// Create a poller; nothing is fetched until [`run`](Self::run) or
    /// [`refresh_once`](Self::refresh_once) is called.
    pub fn new(directory: Arc<dyn DeskDirectory>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            directory,
            clock,
            interval,
            refresh: Arc::new(Notify::new()),
            snapshot_tx,
        }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshot_tx.subscribe()
    }

    /// Handle for on-demand refreshes.
    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            refresh: Arc::clone(&self.refresh),
        }
    }

    /// The most recent successful snapshot.
    pub fn latest(&self) -> Option<Arc<DirectorySnapshot>> {
        self.snapshot_tx.borrow().clone()
    }

    /// Fetch once and publish the result.
    ///
    /// On error nothing is published and the error is returned.
    pub async fn refresh_once(&self) -> AppResult<Arc<DirectorySnapshot>> {
        let records = self.directory.fetch_desks().await?;
        let snapshot = Arc::new(DirectorySnapshot::from_records(records, self.clock.now()));
        self.snapshot_tx.send_replace(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    /// Poll until `cancel` becomes `true` (or its sender is dropped).
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Directory poller started, interval={}s",
            self.interval.as_secs()
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.refresh_logged("interval").await;
                }
                _ = self.refresh.notified() => {
                    self.refresh_logged("on_demand").await;
                    interval.reset();
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Directory poller shutting down");
                        break;
                    }
                }
            }
        }
    }

    async fn refresh_logged(&self, trigger: &'static str) {
        match self.refresh_once().await {
            Ok(snapshot) => tracing::debug!(
                trigger,
                desks = snapshot.len(),
                rejected = snapshot.rejected_entries(),
                "Desk directory refreshed"
            ),
            Err(e) => tracing::error!(
                trigger,
                error = %e,
                stale_since = ?self.latest().map(|s| s.fetched_at()),
                "Desk directory refresh failed, keeping previous snapshot"
            ),
        }
    }
}
