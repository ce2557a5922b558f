//! Per-host outcomes and the insertion-ordered result map.

use std::time::Duration;

use crate::domain::error::TransportError;

// ── Failure detail ────────────────────────────────────────────────────────────

/// Classification of a per-host failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Could not reach the host (network or authentication).
    Connect,
    /// Host did not respond within its bound.
    Timeout,
    /// Host responded but the content could not be parsed into an outcome.
    MalformedResponse,
    /// The invocation was cancelled before this host produced a result.
    Cancelled,
}

/// Error detail recorded for a failed host: message plus any partial
/// response body worth keeping for diagnostics.
#[derive(Debug, Clone)]
pub struct FailureDetail {
    pub kind: FailureKind,
    pub message: String,
    pub body: Option<Vec<u8>>,
}

impl FailureDetail {
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            message: "invocation cancelled before a result was received".to_string(),
            body: None,
        }
    }

    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: format!("no response within {}s", after.as_secs()),
            body: None,
        }
    }
}

impl From<TransportError> for FailureDetail {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connect(message) => Self {
                kind: FailureKind::Connect,
                message,
                body: None,
            },
            TransportError::Timeout(after) => Self::timeout(after),
            TransportError::Malformed { message, body } => Self {
                kind: FailureKind::MalformedResponse,
                message,
                body: Some(body),
            },
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// The result of one action against one host. Success and failure are
/// mutually exclusive; either may carry payload bytes.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success {
        /// Boolean acknowledgement, for actions that return only a flag.
        ack: Option<bool>,
        /// Raw payload bytes (import report, export package). Potentially
        /// large and binary — renderers must not assume text.
        payload: Option<Vec<u8>>,
        /// Structured response document, when the host returned one.
        document: Option<serde_json::Value>,
    },
    Failure(FailureDetail),
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Bytes worth persisting for this host, regardless of success or
    /// failure — a failed import may still carry a diagnostic report.
    #[must_use]
    pub fn payload_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Success { payload, .. } => payload.as_deref(),
            Self::Failure(detail) => detail.body.as_deref(),
        }
    }
}

// ── Result map ────────────────────────────────────────────────────────────────

/// Host → outcome mapping for one invocation. Iteration order is insertion
/// order, which the invoker guarantees equals target-set order; downstream
/// renderers and tests depend on that. Fleets are small, so lookups scan.
#[derive(Debug, Clone, Default)]
pub struct ResultMap {
    entries: Vec<(String, Outcome)>,
}

impl ResultMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome for `host`. Replaces any existing entry in place so
    /// the "every host exactly once" invariant holds even for a misbehaving
    /// caller.
    pub fn insert(&mut self, host: impl Into<String>, outcome: Outcome) {
        let host = host.into();
        if let Some(entry) = self.entries.iter_mut().find(|(h, _)| *h == host) {
            entry.1 = outcome;
        } else {
            self.entries.push((host, outcome));
        }
    }

    #[must_use]
    pub fn get(&self, host: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(h, _)| h == host)
            .map(|(_, o)| o)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(h, o)| (h.as_str(), o))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hosts in insertion order.
    #[must_use]
    pub fn hosts(&self) -> Vec<&str> {
        self.entries.iter().map(|(h, _)| h.as_str()).collect()
    }

    #[must_use]
    pub fn any_failed(&self) -> bool {
        self.entries.iter().any(|(_, o)| !o.is_success())
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| !o.is_success()).count()
    }
}
