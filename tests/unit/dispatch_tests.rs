//! Invoker behavior: coverage, ordering, isolation, timeouts, cancellation.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use armada_cli::application::ports::NullSink;
use armada_cli::application::services::dispatch::dispatch;
use armada_cli::domain::outcome::{FailureKind, Outcome};
use armada_cli::infra::telemetry::RecordingSink;
use tokio_util::sync::CancellationToken;

use crate::mocks;

#[tokio::test]
async fn every_target_appears_exactly_once() {
    let targets = mocks::fleet(&["dp1", "dp2", "dp3"]);
    let transport = Arc::new(mocks::AckTransport);
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.hosts(), vec!["dp1", "dp2", "dp3"]);
    assert!(results.iter().all(|(_, o)| o.is_success()));
}

#[tokio::test]
async fn order_follows_target_set_not_completion() {
    // The slowest host comes first in the set; it must still come first in
    // the result map.
    let mut delays = HashMap::new();
    delays.insert("slow".to_string(), Duration::from_millis(150));
    delays.insert("quick".to_string(), Duration::from_millis(5));
    delays.insert("quicker".to_string(), Duration::from_millis(1));

    let targets = mocks::fleet(&["slow", "quick", "quicker"]);
    let transport = Arc::new(mocks::StaggeredTransport { delays });
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(results.hosts(), vec!["slow", "quick", "quicker"]);
}

#[tokio::test]
async fn one_failing_host_does_not_poison_the_batch() {
    let targets = mocks::fleet(&["good1", "bad", "good2"]);
    let transport = Arc::new(mocks::FaultyTransport {
        failing: vec!["bad".to_string()],
    });
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 3);
    assert!(results.get("good1").expect("present").is_success());
    assert!(results.get("good2").expect("present").is_success());
    match results.get("bad").expect("present") {
        Outcome::Failure(detail) => {
            assert_eq!(detail.kind, FailureKind::Connect);
            assert!(detail.message.contains("connection refused"));
        }
        Outcome::Success { .. } => panic!("bad host must fail"),
    }
}

#[tokio::test]
async fn empty_target_set_returns_empty_map_without_network() {
    let targets = mocks::fleet(&[]);
    let transport = Arc::new(mocks::PanicTransport);
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn hung_host_times_out_without_delaying_others() {
    let targets = mocks::fleet_with_timeout(&["hung"], Duration::from_millis(50));
    let transport = Arc::new(mocks::HangingTransport);
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    match results.get("hung").expect("present") {
        Outcome::Failure(detail) => assert_eq!(detail.kind, FailureKind::Timeout),
        Outcome::Success { .. } => panic!("hung host must time out"),
    }
}

#[tokio::test]
async fn cancellation_records_unfinished_hosts_instead_of_dropping_them() {
    let targets = mocks::fleet(&["dp1", "dp2"]);
    let transport = Arc::new(mocks::HangingTransport);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &cancel,
    )
    .await;

    assert_eq!(results.len(), 2);
    for (_, outcome) in results.iter() {
        match outcome {
            Outcome::Failure(detail) => assert_eq!(detail.kind, FailureKind::Cancelled),
            Outcome::Success { .. } => panic!("cancelled hosts must not succeed"),
        }
    }
}

#[tokio::test]
async fn crashed_worker_still_leaves_a_failure_entry() {
    let targets = mocks::fleet(&["ok1", "crash", "ok2"]);
    let transport = Arc::new(mocks::PanicForHost {
        host: "crash".to_string(),
    });
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(results.len(), 3);
    assert!(results.get("ok1").expect("present").is_success());
    assert!(results.get("ok2").expect("present").is_success());
    assert!(!results.get("crash").expect("present").is_success());
}

#[tokio::test]
async fn payload_flows_from_transport_to_persisted_artifact() {
    use armada_cli::application::services::artifacts::{ArtifactPlan, persist};
    use armada_cli::domain::timestamp::TimestampToken;

    let bytes = b"PK\x03\x04 export package".to_vec();
    let targets = mocks::fleet(&["dp1"]);
    let transport = Arc::new(mocks::PayloadTransport(bytes.clone()));
    let results = dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &NullSink,
        &CancellationToken::new(),
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let plan = ArtifactPlan::export(dir.path(), TimestampToken::fixed("t1"), "gw", "zip");
    let report = persist(&results, &plan, &NullSink);

    assert!(report.failures.is_empty());
    let read_back = std::fs::read(&report.written[0].path).expect("read artifact");
    assert_eq!(read_back, bytes);
}

#[tokio::test]
async fn events_arrive_in_target_order() {
    let targets = mocks::fleet(&["b", "a"]);
    let transport = Arc::new(mocks::AckTransport);
    let sink = RecordingSink::new();

    dispatch(
        &transport,
        &targets,
        &mocks::flush_request(),
        &sink,
        &CancellationToken::new(),
    )
    .await;

    let lines: Vec<String> = sink.snapshot().into_iter().map(|e| e.line).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("dispatching to 2 appliance(s)"));
    assert!(lines[1].contains("b succeeded"));
    assert!(lines[2].contains("a succeeded"));
}
