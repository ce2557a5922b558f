//! Property-based tests for address validation and credential pairing.

#![allow(clippy::expect_used)]

use std::time::Duration;

use armada_cli::domain::target::TargetSet;
use proptest::prelude::*;

proptest! {
    /// Any list of distinct well-formed hostnames builds, with one handle
    /// per address, in order, all sharing the single credential.
    #[test]
    fn wellformed_unique_addresses_always_build(
        hosts in proptest::collection::hash_set("[a-z][a-z0-9]{0,9}(\\.[a-z0-9]{1,8}){0,2}", 0..8)
    ) {
        let addresses: Vec<String> = hosts.into_iter().collect();
        let set = TargetSet::build(
            &addresses,
            &["admin:secret".to_string()],
            Duration::from_secs(5),
            true,
        ).expect("well-formed addresses must build");

        prop_assert_eq!(set.len(), addresses.len());
        let built: Vec<&str> = set.hosts();
        let given: Vec<&str> = addresses.iter().map(String::as_str).collect();
        prop_assert_eq!(built, given);
        prop_assert!(set.iter().all(|h| h.credential.user == "admin"));
    }

    /// Addresses containing characters outside the host grammar never build.
    #[test]
    fn addresses_with_forbidden_characters_never_build(
        head in "[a-z]{1,8}",
        bad in "[ ;|&`$!#]",
        tail in "[a-z]{0,8}",
    ) {
        let address = format!("{head}{bad}{tail}");
        let result = TargetSet::build(
            &[address],
            &["admin:secret".to_string()],
            Duration::from_secs(5),
            true,
        );
        prop_assert!(result.is_err());
    }

    /// Per-position pairing keeps each credential with its own appliance.
    #[test]
    fn positional_pairing_is_stable(n in 1usize..6) {
        let addresses: Vec<String> = (0..n).map(|i| format!("dp{i}")).collect();
        let credentials: Vec<String> = (0..n).map(|i| format!("user{i}:pw{i}")).collect();
        let set = TargetSet::build(
            &addresses,
            &credentials,
            Duration::from_secs(5),
            true,
        ).expect("matched counts must build");

        for (i, handle) in set.iter().enumerate() {
            let expected_address = format!("dp{i}");
            let expected_user = format!("user{i}");
            prop_assert_eq!(handle.address.as_str(), expected_address.as_str());
            prop_assert_eq!(handle.credential.user.as_str(), expected_user.as_str());
        }
    }
}
