//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `tokio`, `std::fs`, or `std::net`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::time::Duration;

use thiserror::Error;

// ── Target-set construction errors ────────────────────────────────────────────

/// Errors raised while building a target set. All of these are fatal to the
/// whole invocation and are reported before any network call is made.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Duplicate appliance address '{0}' in target set.")]
    DuplicateTarget(String),

    #[error("Invalid appliance address '{0}': expected host or host:port.")]
    InvalidAddress(String),

    #[error("Timeout must be a positive number of seconds.")]
    InvalidTimeout,

    #[error(
        "{addresses} appliances but {credentials} credentials: supply one credential for all appliances, or one per appliance."
    )]
    CredentialMismatch { addresses: usize, credentials: usize },

    #[error("Malformed credential at position {0}: expected user:secret.")]
    MalformedCredential(usize),
}

// ── Per-host transport errors ─────────────────────────────────────────────────

/// Errors produced by a transport for a single appliance. Never fatal to the
/// batch — the invoker records them as per-host failure outcomes.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("malformed response: {message}")]
    Malformed {
        message: String,
        /// Raw response bytes, kept for diagnostics.
        body: Vec<u8>,
    },
}

// ── Artifact persistence errors ───────────────────────────────────────────────

/// Aggregate artifact-persistence failure, produced only after every host's
/// artifact has been attempted. Successful writes are never rolled back.
#[derive(Debug, Error)]
#[error("{failed} of {attempted} artifact writes failed:\n{detail}")]
pub struct PersistError {
    pub failed: usize,
    pub attempted: usize,
    /// One line per failed host: `<host>: <reason>`.
    pub detail: String,
}
