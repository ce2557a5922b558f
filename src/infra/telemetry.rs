//! Event sinks: the tracing bridge and the in-memory history recorder.

use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::application::ports::EventSink;
use crate::domain::event::DispatchEvent;

/// Forwards dispatch events to the `tracing` subscriber as structured log
/// records.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &DispatchEvent) {
        match event {
            DispatchEvent::ActionStarted { op, targets } => {
                tracing::info!(op = %op, targets = *targets, "dispatch started");
            }
            DispatchEvent::HostSucceeded { host, op } => {
                tracing::info!(host = %host, op = %op, "host succeeded");
            }
            DispatchEvent::HostFailed { host, op, message } => {
                tracing::warn!(host = %host, op = %op, message = %message, "host failed");
            }
            DispatchEvent::HostCancelled { host, op } => {
                tracing::warn!(host = %host, op = %op, "host cancelled");
            }
            DispatchEvent::ArtifactWritten { host, path, bytes } => {
                tracing::info!(host = %host, path = %path.display(), bytes = *bytes, "artifact written");
            }
            DispatchEvent::ArtifactFailed { host, message } => {
                tracing::warn!(host = %host, message = %message, "artifact write failed");
            }
        }
    }
}

/// One recorded history line.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub at: DateTime<Local>,
    pub line: String,
}

/// Records every event with a timestamp; the web report's history panel
/// renders the snapshot.
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded so far, in emission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &DispatchEvent) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(HistoryEntry {
                at: Local::now(),
                line: event.describe(),
            });
        }
    }
}
