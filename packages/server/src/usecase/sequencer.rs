//! Serializes roster events.
//!
//! Connect, disconnect and message events arrive concurrently from many
//! sessions. Holding the sequencer while mutating the roster and enqueueing
//! the resulting broadcast guarantees that snapshots reach every channel in
//! the order the mutations happened. Enqueueing never blocks, so a slow
//! channel cannot hold the sequencer.

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct EventSequencer {
    turn: Mutex<()>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the current event to finish, then hold the turn until the
    /// returned guard is dropped.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }
}
