//! Appliance handles and target-set construction.
//!
//! Pure data and validation — no I/O, no async. Zero imports from
//! `crate::infra`, `crate::commands`, or `crate::application`.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::domain::error::TargetError;

/// `host` or `host:port`; checked before any address is interpolated into a
/// URL or a filesystem path.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.-]*(:\d{1,5})?$").expect("valid regex")
});

// ── Credential ────────────────────────────────────────────────────────────────

/// One appliance login. Parsed from `user:secret`; the secret never appears
/// in `Debug` output or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub user: String,
    pub secret: String,
}

impl Credential {
    /// Parse a `user:secret` pair. `position` is only used to identify the
    /// offending argument in the error without echoing its content.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::MalformedCredential`] if the string has no `:`
    /// separator or an empty user part.
    pub fn parse(raw: &str, position: usize) -> Result<Self, TargetError> {
        match raw.split_once(':') {
            Some((user, secret)) if !user.is_empty() => Ok(Self {
                user: user.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(TargetError::MalformedCredential(position)),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ── Appliance handle ──────────────────────────────────────────────────────────

/// One network endpoint: address, login, and per-call policy. Immutable once
/// constructed; identity is the address (used as the result-map key).
#[derive(Debug, Clone)]
pub struct ApplianceHandle {
    pub address: String,
    pub credential: Credential,
    pub timeout: Duration,
    pub verify_hostname: bool,
}

// ── Target set ────────────────────────────────────────────────────────────────

/// Ordered collection of unique appliance handles addressed by one
/// invocation. Built once, shared read-only across all per-host calls.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    handles: Vec<ApplianceHandle>,
}

impl TargetSet {
    /// Build a target set from parallel address/credential lists.
    ///
    /// Credentials pair with addresses by position; as a convenience a single
    /// credential fans out to every address. An empty address list is legal
    /// and yields an empty set.
    ///
    /// # Errors
    ///
    /// Fails fast — before any network call — with [`TargetError`] on a
    /// duplicate address, a malformed address or credential, a credential
    /// count that matches neither `1` nor the address count, or a
    /// non-positive timeout.
    pub fn build(
        addresses: &[String],
        credentials: &[String],
        timeout: Duration,
        verify_hostname: bool,
    ) -> Result<Self, TargetError> {
        if timeout.is_zero() {
            return Err(TargetError::InvalidTimeout);
        }
        if !addresses.is_empty()
            && credentials.len() != 1
            && credentials.len() != addresses.len()
        {
            return Err(TargetError::CredentialMismatch {
                addresses: addresses.len(),
                credentials: credentials.len(),
            });
        }

        let parsed: Vec<Credential> = credentials
            .iter()
            .enumerate()
            .map(|(i, raw)| Credential::parse(raw, i + 1))
            .collect::<Result<_, _>>()?;

        let mut seen = HashSet::new();
        let mut handles = Vec::with_capacity(addresses.len());
        for (i, address) in addresses.iter().enumerate() {
            if !ADDRESS_RE.is_match(address) {
                return Err(TargetError::InvalidAddress(address.clone()));
            }
            if !seen.insert(address.as_str()) {
                return Err(TargetError::DuplicateTarget(address.clone()));
            }
            let credential = if parsed.len() == 1 {
                parsed[0].clone()
            } else {
                parsed[i].clone()
            };
            handles.push(ApplianceHandle {
                address: address.clone(),
                credential,
                timeout,
                verify_hostname,
            });
        }

        Ok(Self { handles })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApplianceHandle> {
        self.handles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Addresses in construction order.
    #[must_use]
    pub fn hosts(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.address.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a ApplianceHandle;
    type IntoIter = std::slice::Iter<'a, ApplianceHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}
