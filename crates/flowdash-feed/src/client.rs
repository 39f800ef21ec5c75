//! Feed client: applies snapshot and batch events to the shared board
//!
//! One task owns the only mutation path into the board. Events are applied
//! strictly in arrival order; an incremental batch holds the loading flag
//! through the settle delay and is never coalesced with a neighbor, so two
//! racing batches can never land out of order.

use std::time::Duration;

use flowdash_config::FeedConfig;
use flowdash_core::SharedBoard;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::FeedEvent;

/// Timing knobs for the feed client
#[derive(Debug, Clone, Copy)]
pub struct FeedSettings {
    /// How long to wait for the initial snapshot before rendering empty
    pub startup_timeout: Duration,
    /// Pause between receiving a batch and applying it
    pub settle_delay: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            startup_timeout: Duration::from_millis(5000),
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl From<FeedConfig> for FeedSettings {
    fn from(config: FeedConfig) -> Self {
        Self {
            startup_timeout: Duration::from_millis(config.startup_timeout_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

/// Handle to a running feed client. Owned by the view lifecycle: dropping
/// it stops the task, cancels any pending timer, and releases the stream.
#[derive(Debug)]
pub struct FeedHandle {
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Stop the feed task
    pub fn shutdown(&self) {
        self.task.abort();
    }

    /// Whether the task has exited (stream closed or shut down)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The transaction feed client
pub struct FeedClient;

impl FeedClient {
    /// Spawn the feed task over an already-connected event stream.
    ///
    /// The task drives the board through the whole session: startup timeout,
    /// snapshot application, and serialized batch application.
    pub fn spawn(
        events: mpsc::Receiver<FeedEvent>,
        board: SharedBoard,
        settings: FeedSettings,
    ) -> FeedHandle {
        let task = tokio::spawn(run(events, board, settings));
        FeedHandle { task }
    }
}

async fn run(mut events: mpsc::Receiver<FeedEvent>, board: SharedBoard, settings: FeedSettings) {
    board.write().await.set_loading(true);

    // Startup phase: wait for the first snapshot, bounded by the timeout.
    // If the timeout fires we fail open to the empty list; this is policy,
    // not an error surface.
    let startup = tokio::time::sleep(settings.startup_timeout);
    tokio::pin!(startup);

    loop {
        tokio::select! {
            _ = &mut startup => {
                log::warn!(
                    "no snapshot within {}ms; rendering empty table",
                    settings.startup_timeout.as_millis()
                );
                board.write().await.set_loading(false);
                break;
            }
            event = events.recv() => match event {
                Some(FeedEvent::Connected) => {
                    log::debug!("feed connection established");
                }
                Some(FeedEvent::Snapshot(records)) => {
                    log::info!("snapshot received: {} records", records.len());
                    board.write().await.apply_snapshot(records);
                    // Leaving the startup phase cancels the timeout
                    break;
                }
                Some(FeedEvent::Batch(records)) => {
                    apply_batch(&board, records, settings.settle_delay).await;
                }
                None => {
                    log::warn!("feed stream closed before snapshot");
                    board.write().await.set_loading(false);
                    return;
                }
            }
        }
    }

    // Steady phase: apply events one at a time, in arrival order
    while let Some(event) = events.recv().await {
        match event {
            FeedEvent::Connected => {}
            FeedEvent::Snapshot(records) => {
                log::info!("snapshot replaced: {} records", records.len());
                board.write().await.apply_snapshot(records);
            }
            FeedEvent::Batch(records) => {
                apply_batch(&board, records, settings.settle_delay).await;
            }
        }
    }
    log::info!("feed stream closed");
}

/// Apply one incremental batch: loading on, settle, prepend, loading off.
/// The prepend reads the board under the write lock at mutation time, so
/// the settle delay can never act on a stale view of the list.
async fn apply_batch(board: &SharedBoard, records: Vec<flowdash_core::Transaction>, delay: Duration) {
    log::info!("incremental batch received: {} records", records.len());
    board.write().await.set_loading(true);
    tokio::time::sleep(delay).await;
    let mut guard = board.write().await;
    guard.prepend_batch(records);
    guard.set_loading(false);
}

// ==================== Tests ====================
