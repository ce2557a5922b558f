//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use crate::domain::action::ActionRequest;
use crate::domain::error::TransportError;
use crate::domain::event::DispatchEvent;
use crate::domain::outcome::Outcome;
use crate::domain::target::ApplianceHandle;

// ── Transport port ────────────────────────────────────────────────────────────

/// What one appliance sent back, before normalization into an [`Outcome`].
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Boolean acknowledgement for flag-only actions.
    pub ack: Option<bool>,
    /// Raw payload bytes (import report, export package).
    pub payload: Option<Vec<u8>>,
    /// Structured response document, when the host returned one.
    pub document: Option<serde_json::Value>,
}

impl RawResponse {
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        Outcome::Success {
            ack: self.ack,
            payload: self.payload,
            document: self.document,
        }
    }
}

/// Abstracts "can execute an action against one target" so the invoker can
/// be tested without network access and the wire protocol can be swapped.
///
/// `async_trait` rather than a native async fn: the invoker spawns each
/// per-host call onto its own task, which needs the returned future to be
/// provably `Send`.
#[async_trait::async_trait]
pub trait ApplianceTransport {
    /// Submit `request` to the appliance behind `handle` and await a bounded
    /// response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] classifying the failure; the invoker
    /// records it as that host's failure outcome and keeps going.
    async fn perform(
        &self,
        handle: &ApplianceHandle,
        request: &ActionRequest,
    ) -> Result<RawResponse, TransportError>;
}

// ── Event sink port ───────────────────────────────────────────────────────────

/// Receives structured dispatch events. Sync trait — no async needed.
pub trait EventSink {
    fn emit(&self, event: &DispatchEvent);
}

/// Discards every event. Default sink for tests.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _: &DispatchEvent) {}
}

/// Forwards each event to every inner sink, so an invocation can feed the
/// terminal log and the web history panel at once.
pub struct FanoutSink<'a> {
    sinks: &'a [&'a dyn EventSink],
}

impl<'a> FanoutSink<'a> {
    #[must_use]
    pub fn new(sinks: &'a [&'a dyn EventSink]) -> Self {
        Self { sinks }
    }
}

impl EventSink for FanoutSink<'_> {
    fn emit(&self, event: &DispatchEvent) {
        for sink in self.sinks {
            sink.emit(event);
        }
    }
}
