//! Hands finished access log rows to a background writer.
//!
//! Writing a row means one or more round-trips to the spreadsheet API, which must
//! never hold up or alter the lookup response. The handler therefore only pushes
//! the row into a channel and returns.
//!
//! The main components are:
//! - `LogState`: a clonable handle holding the channel sender. It lives inside the
//!   lookup handler state built in `main.rs`.
//! - `LogUpdate`: one row to append, tagged with the id of the request that produced it.
//! - `start_log_writer`: a long-running task that drains the channel and appends each
//!   row through a `LogWriter`, reporting failures through the `log` facade.

use crate::adapters::log_writer::LogWriter;
use common::model::log_entry::LogEntry;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

/// Sending side of the access log pipeline.
///
/// Cloning is cheap; every clone feeds the same writer task.
#[derive(Clone)]
pub struct LogState {
    /// Bounded sender. When the writer falls behind and the buffer is full, new
    /// rows are dropped with a warning instead of blocking the request.
    pub tx: mpsc::Sender<LogUpdate>,
}

/// A row waiting to be appended.
#[derive(Debug)]
pub struct LogUpdate {
    /// Identifies the lookup in the service's own log output.
    pub(crate) request_id: Uuid,
    /// The row itself.
    pub(crate) entry: LogEntry,
}

impl LogState {
    /// Creates the handle and the receiver to pass to `start_log_writer`.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LogUpdate>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Queues `entry` without waiting. Never fails from the caller's point of view.
    pub fn dispatch(&self, request_id: Uuid, entry: LogEntry) {
        match self.tx.try_send(LogUpdate { request_id, entry }) {
            Ok(()) => debug!("Queued access log row for request {request_id}"),
            Err(TrySendError::Full(update)) => warn!(
                "Access log queue full, dropping row for serial {} (request {})",
                update.entry.serial, update.request_id
            ),
            Err(TrySendError::Closed(update)) => error!(
                "Access log writer is gone, dropping row for serial {} (request {})",
                update.entry.serial, update.request_id
            ),
        }
    }
}

/// Starts the access log writer loop.
///
/// Spawned once at startup (see `main.rs`). Rows are appended one at a time in the
/// order they were queued. A failed append is logged and the loop moves on to the
/// next row; the loop ends when every `LogState` clone has been dropped.
pub async fn start_log_writer(writer: LogWriter, mut rx: mpsc::Receiver<LogUpdate>) {
    while let Some(update) = rx.recv().await {
        match writer.append(&update.entry).await {
            Ok(()) => info!(
                "Logged {} lookup of serial {} for request {}",
                if update.entry.is_success() { "successful" } else { "failed" },
                update.entry.serial,
                update.request_id
            ),
            Err(e) => error!(
                "Failed to append access log row for serial {} (request {}): {}",
                update.entry.serial, update.request_id, e
            ),
        }
    }
    info!("Access log writer stopped");
}
