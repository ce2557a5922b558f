//! Structured dispatch events.
//!
//! The invoker and artifact writer emit these to an injected sink instead of
//! writing to a process-wide logger, so presentation layers (terminal log,
//! web history panel) choose what to do with them.

use std::path::PathBuf;

/// One observable step of an invocation.
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    ActionStarted {
        op: &'static str,
        targets: usize,
    },
    HostSucceeded {
        host: String,
        op: &'static str,
    },
    HostFailed {
        host: String,
        op: &'static str,
        message: String,
    },
    HostCancelled {
        host: String,
        op: &'static str,
    },
    ArtifactWritten {
        host: String,
        path: PathBuf,
        bytes: usize,
    },
    ArtifactFailed {
        host: String,
        message: String,
    },
}

impl DispatchEvent {
    /// One-line description used by history panels.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::ActionStarted { op, targets } => {
                format!("{op}: dispatching to {targets} appliance(s)")
            }
            Self::HostSucceeded { host, op } => format!("{op}: {host} succeeded"),
            Self::HostFailed { host, op, message } => {
                format!("{op}: {host} failed: {message}")
            }
            Self::HostCancelled { host, op } => format!("{op}: {host} cancelled"),
            Self::ArtifactWritten { host, path, bytes } => {
                format!("{host}: wrote {bytes} bytes to {}", path.display())
            }
            Self::ArtifactFailed { host, message } => {
                format!("{host}: artifact write failed: {message}")
            }
        }
    }
}
