//! Artifact writer: round-trips, layouts, namespace isolation, partial
//! failure.

#![allow(clippy::expect_used)]

use armada_cli::application::ports::NullSink;
use armada_cli::application::services::artifacts::{ArtifactPlan, persist};
use armada_cli::domain::outcome::{FailureDetail, FailureKind, Outcome, ResultMap};
use armada_cli::domain::timestamp::TimestampToken;

fn success_with_payload(bytes: &[u8]) -> Outcome {
    Outcome::Success {
        ack: None,
        payload: Some(bytes.to_vec()),
        document: None,
    }
}

fn ack_only() -> Outcome {
    Outcome::Success {
        ack: Some(true),
        payload: None,
        document: None,
    }
}

#[test]
fn payload_bytes_round_trip_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bytes = b"<import-results>\x00\xff binary ok</import-results>".to_vec();
    let mut results = ResultMap::new();
    results.insert("dp1", success_with_payload(&bytes));

    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("20260807120000"));
    let report = persist(&results, &plan, &NullSink);

    assert!(report.failures.is_empty());
    assert_eq!(report.written.len(), 1);
    let written = &report.written[0];
    assert_eq!(written.host, "dp1");
    let read_back = std::fs::read(&written.path).expect("read artifact");
    assert_eq!(read_back, bytes);
    assert_eq!(written.sha256.len(), 64);
}

#[test]
fn import_layout_shape() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1"));
    let path = plan.path_for("dp1");
    assert_eq!(
        path,
        dir.path()
            .join("import_results")
            .join("t1")
            .join("dp1-import_results.xml")
    );
}

#[test]
fn export_layout_groups_by_host() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = ArtifactPlan::export(dir.path(), TimestampToken::fixed("t1"), "gateway", "zip");
    let path = plan.path_for("dp2");
    assert_eq!(
        path,
        dir.path().join("dp2").join("t1").join("t1-dp2-gateway.zip")
    );
}

#[test]
fn hosts_without_payload_produce_no_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut results = ResultMap::new();
    results.insert("dp1", ack_only());

    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1"));
    let report = persist(&results, &plan, &NullSink);

    assert!(report.written.is_empty());
    assert!(report.failures.is_empty());
    // Not even the operation directory should exist for a payload-less run.
    assert!(!dir.path().join("import_results").exists());
}

#[test]
fn failure_outcomes_with_diagnostic_bytes_are_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut results = ResultMap::new();
    results.insert(
        "dp1",
        Outcome::Failure(FailureDetail {
            kind: FailureKind::MalformedResponse,
            message: "HTTP 500".to_string(),
            body: Some(b"partial diagnostic".to_vec()),
        }),
    );

    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1"));
    let report = persist(&results, &plan, &NullSink);

    assert_eq!(report.written.len(), 1);
    let read_back = std::fs::read(&report.written[0].path).expect("read artifact");
    assert_eq!(read_back, b"partial diagnostic");
}

#[test]
fn different_tokens_never_collide() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut results = ResultMap::new();
    results.insert("dp1", success_with_payload(b"first"));

    let first = persist(
        &results,
        &ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1")),
        &NullSink,
    );

    let mut results = ResultMap::new();
    results.insert("dp1", success_with_payload(b"second"));
    let second = persist(
        &results,
        &ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t2")),
        &NullSink,
    );

    assert!(first.failures.is_empty());
    assert!(second.failures.is_empty());
    let a = std::fs::read(&first.written[0].path).expect("first artifact");
    let b = std::fs::read(&second.written[0].path).expect("second artifact");
    assert_eq!(a, b"first");
    assert_eq!(b, b"second");
}

#[test]
fn reusing_a_token_refuses_to_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut results = ResultMap::new();
    results.insert("dp1", success_with_payload(b"original"));

    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1"));
    let first = persist(&results, &plan, &NullSink);
    assert!(first.failures.is_empty());

    let second = persist(&results, &plan, &NullSink);
    assert_eq!(second.written.len(), 0);
    assert_eq!(second.failures.len(), 1);
    assert!(second.failures[0].1.contains("already exists"));

    // The original bytes survive the refused overwrite.
    let kept = std::fs::read(&first.written[0].path).expect("read artifact");
    assert_eq!(kept, b"original");
}

#[test]
fn one_bad_path_does_not_lose_other_hosts_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = ArtifactPlan::import_results(dir.path(), TimestampToken::fixed("t1"));

    // Occupy dp1's destination in advance so only that write fails.
    let blocked = plan.path_for("dp1");
    std::fs::create_dir_all(blocked.parent().expect("parent")).expect("mkdir");
    std::fs::write(&blocked, b"occupied").expect("pre-create");

    let mut results = ResultMap::new();
    results.insert("dp1", success_with_payload(b"lost"));
    results.insert("dp2", success_with_payload(b"kept"));

    let report = persist(&results, &plan, &NullSink);

    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].host, "dp2");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "dp1");

    let err = report.into_result().expect_err("aggregate failure expected");
    assert_eq!(err.failed, 1);
    assert_eq!(err.attempted, 2);
    assert!(err.detail.contains("dp1"));
}
