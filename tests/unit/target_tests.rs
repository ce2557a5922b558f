//! Target-set construction: pairing, validation, duplicate rejection.

#![allow(clippy::expect_used)]

use std::time::Duration;

use armada_cli::domain::error::TargetError;
use armada_cli::domain::target::{Credential, TargetSet};

fn addrs(hosts: &[&str]) -> Vec<String> {
    hosts.iter().map(ToString::to_string).collect()
}

fn creds(pairs: &[&str]) -> Vec<String> {
    pairs.iter().map(ToString::to_string).collect()
}

#[test]
fn duplicate_address_is_rejected() {
    let err = TargetSet::build(
        &addrs(&["dp1", "dp2", "dp1"]),
        &creds(&["admin:secret"]),
        Duration::from_secs(5),
        true,
    )
    .expect_err("duplicates must fail");
    match err {
        TargetError::DuplicateTarget(addr) => assert_eq!(addr, "dp1"),
        other => panic!("wrong error: {other}"),
    }
}

#[test]
fn single_credential_fans_out_to_every_address() {
    let set = TargetSet::build(
        &addrs(&["dp1", "dp2", "dp3"]),
        &creds(&["admin:secret"]),
        Duration::from_secs(5),
        true,
    )
    .expect("valid set");
    assert_eq!(set.len(), 3);
    assert!(set.iter().all(|h| h.credential.user == "admin"));
}

#[test]
fn credentials_pair_by_position() {
    let set = TargetSet::build(
        &addrs(&["dp1", "dp2"]),
        &creds(&["alice:a", "bob:b"]),
        Duration::from_secs(5),
        true,
    )
    .expect("valid set");
    let users: Vec<&str> = set.iter().map(|h| h.credential.user.as_str()).collect();
    assert_eq!(users, vec!["alice", "bob"]);
}

#[test]
fn mismatched_credential_count_is_rejected() {
    let err = TargetSet::build(
        &addrs(&["dp1", "dp2", "dp3"]),
        &creds(&["alice:a", "bob:b"]),
        Duration::from_secs(5),
        true,
    )
    .expect_err("mismatch must fail");
    match err {
        TargetError::CredentialMismatch {
            addresses,
            credentials,
        } => {
            assert_eq!(addresses, 3);
            assert_eq!(credentials, 2);
        }
        other => panic!("wrong error: {other}"),
    }
}

#[test]
fn credential_without_separator_is_rejected() {
    let err = TargetSet::build(
        &addrs(&["dp1"]),
        &creds(&["nocolon"]),
        Duration::from_secs(5),
        true,
    )
    .expect_err("malformed credential must fail");
    assert!(matches!(err, TargetError::MalformedCredential(1)));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = TargetSet::build(
        &addrs(&["dp1"]),
        &creds(&["admin:secret"]),
        Duration::ZERO,
        true,
    )
    .expect_err("zero timeout must fail");
    assert!(matches!(err, TargetError::InvalidTimeout));
}

#[test]
fn address_with_shell_garbage_is_rejected() {
    let err = TargetSet::build(
        &addrs(&["dp1; rm -rf /"]),
        &creds(&["admin:secret"]),
        Duration::from_secs(5),
        true,
    )
    .expect_err("bad address must fail");
    assert!(matches!(err, TargetError::InvalidAddress(_)));
}

#[test]
fn host_with_port_is_accepted() {
    let set = TargetSet::build(
        &addrs(&["dp1.example.com:5554"]),
        &creds(&["admin:secret"]),
        Duration::from_secs(5),
        true,
    )
    .expect("valid set");
    assert_eq!(set.hosts(), vec!["dp1.example.com:5554"]);
}

#[test]
fn empty_address_list_builds_an_empty_set() {
    let set = TargetSet::build(&[], &[], Duration::from_secs(5), true).expect("empty set is legal");
    assert!(set.is_empty());
}

#[test]
fn credential_debug_never_shows_the_secret() {
    let cred = Credential::parse("admin:hunter2", 1).expect("valid credential");
    let shown = format!("{cred:?}");
    assert!(shown.contains("<redacted>"));
    assert!(!shown.contains("hunter2"));
}

#[test]
fn secret_may_contain_colons() {
    let cred = Credential::parse("admin:se:cr:et", 1).expect("valid credential");
    assert_eq!(cred.user, "admin");
    assert_eq!(cred.secret, "se:cr:et");
}
