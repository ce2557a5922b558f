//! The action invoker: scatter-gather dispatch across a target set.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{ApplianceTransport, EventSink};
use crate::domain::action::ActionRequest;
use crate::domain::outcome::{FailureDetail, FailureKind, Outcome, ResultMap};
use crate::domain::target::TargetSet;

/// Execute `request` against every handle in `targets` and return one
/// outcome per host.
///
/// Each host runs as its own task, bounded by that handle's timeout; a slow
/// or failing appliance never delays or suppresses the others' results. The
/// returned map always covers the full target set in construction order,
/// whatever order the per-host calls complete in. A host whose call is still
/// in flight when `cancel` fires is recorded as a cancellation failure, not
/// omitted.
///
/// Per-host failures are data, not errors — this function does not fail.
pub async fn dispatch<T, S>(
    transport: &Arc<T>,
    targets: &TargetSet,
    request: &Arc<ActionRequest>,
    sink: &S,
    cancel: &CancellationToken,
) -> ResultMap
where
    T: ApplianceTransport + Send + Sync + 'static,
    S: EventSink + ?Sized,
{
    sink.emit(&crate::domain::event::DispatchEvent::ActionStarted {
        op: request.op_label(),
        targets: targets.len(),
    });

    let mut set: JoinSet<(usize, Outcome)> = JoinSet::new();
    for (index, handle) in targets.iter().enumerate() {
        let transport = Arc::clone(transport);
        let request = Arc::clone(request);
        let handle = handle.clone();
        let cancel = cancel.clone();
        set.spawn(async move {
            let outcome = tokio::select! {
                () = cancel.cancelled() => Outcome::Failure(FailureDetail::cancelled()),
                bounded = tokio::time::timeout(handle.timeout, transport.perform(&handle, &request)) => {
                    match bounded {
                        Ok(Ok(raw)) => raw.into_outcome(),
                        Ok(Err(err)) => Outcome::Failure(err.into()),
                        Err(_) => Outcome::Failure(FailureDetail::timeout(handle.timeout)),
                    }
                }
            };
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<Outcome>> = (0..targets.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        if let Ok((index, outcome)) = joined {
            slots[index] = Some(outcome);
        }
        // A panicked worker leaves its slot empty; it is backfilled below so
        // the total-coverage invariant survives even that.
    }

    let mut results = ResultMap::new();
    for (handle, slot) in targets.iter().zip(slots) {
        let outcome = slot.unwrap_or_else(|| {
            Outcome::Failure(FailureDetail {
                kind: FailureKind::Connect,
                message: "worker task aborted before producing a result".to_string(),
                body: None,
            })
        });
        emit_host_event(sink, request.op_label(), &handle.address, &outcome);
        results.insert(handle.address.clone(), outcome);
    }
    results
}

fn emit_host_event<S: EventSink + ?Sized>(sink: &S, op: &'static str, host: &str, outcome: &Outcome) {
    use crate::domain::event::DispatchEvent;

    let event = match outcome {
        Outcome::Success { .. } => DispatchEvent::HostSucceeded {
            host: host.to_string(),
            op,
        },
        Outcome::Failure(detail) if detail.kind == FailureKind::Cancelled => {
            DispatchEvent::HostCancelled {
                host: host.to_string(),
                op,
            }
        }
        Outcome::Failure(detail) => DispatchEvent::HostFailed {
            host: host.to_string(),
            op,
            message: detail.message.clone(),
        },
    };
    sink.emit(&event);
}
