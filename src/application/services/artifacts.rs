//! Artifact persistence: write per-host payloads under timestamp-namespaced
//! paths, isolating I/O failures per host.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::application::ports::EventSink;
use crate::domain::error::PersistError;
use crate::domain::event::DispatchEvent;
use crate::domain::outcome::ResultMap;
use crate::domain::timestamp::TimestampToken;

// ── Plan ──────────────────────────────────────────────────────────────────────

/// Directory shape for one operation's artifacts. Both layouts come from the
/// tool this replaces and stay stable so operators' scripts keep working.
#[derive(Debug, Clone)]
pub enum Layout {
    /// `<base>/<label>/<token>/<host>-<label>.<ext>` — import reports.
    ByOperation,
    /// `<base>/<host>/<token>/<token>-<host>-<object>.<ext>` — export
    /// packages, grouped per appliance.
    ByHost { object: String },
}

/// Where and how to persist one invocation's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    pub base_dir: PathBuf,
    pub token: TimestampToken,
    pub label: String,
    pub ext: String,
    pub layout: Layout,
}

impl ArtifactPlan {
    /// Plan for import result reports.
    #[must_use]
    pub fn import_results(base_dir: &Path, token: TimestampToken) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            token,
            label: "import_results".to_string(),
            ext: "xml".to_string(),
            layout: Layout::ByOperation,
        }
    }

    /// Plan for exported configuration packages.
    #[must_use]
    pub fn export(base_dir: &Path, token: TimestampToken, object: &str, ext: &str) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            token,
            label: "export".to_string(),
            ext: ext.to_string(),
            layout: Layout::ByHost {
                object: object.to_string(),
            },
        }
    }

    /// Destination path for one host's artifact.
    #[must_use]
    pub fn path_for(&self, host: &str) -> PathBuf {
        match &self.layout {
            Layout::ByOperation => self
                .base_dir
                .join(&self.label)
                .join(self.token.as_str())
                .join(format!("{host}-{}.{}", self.label, self.ext)),
            Layout::ByHost { object } => self
                .base_dir
                .join(host)
                .join(self.token.as_str())
                .join(format!("{}-{host}-{object}.{}", self.token, self.ext)),
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// One successfully persisted artifact.
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub host: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex SHA-256 of the written bytes, for download tables and audits.
    pub sha256: String,
}

/// Result of attempting every host's artifact. Successes and failures are
/// reported together; nothing already written is rolled back.
#[derive(Debug, Default)]
pub struct PersistReport {
    /// Host → path actually written, in result-map order.
    pub written: Vec<WrittenArtifact>,
    /// `(host, reason)` for each failed write.
    pub failures: Vec<(String, String)>,
    attempted: usize,
}

impl PersistReport {
    #[must_use]
    pub fn any_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Convert into the aggregate error the caller propagates after the full
    /// report has been shown.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when any host's write failed.
    pub fn into_result(self) -> Result<Vec<WrittenArtifact>, PersistError> {
        if self.failures.is_empty() {
            return Ok(self.written);
        }
        let detail = self
            .failures
            .iter()
            .map(|(host, reason)| format!("{host}: {reason}"))
            .collect::<Vec<_>>()
            .join("\n");
        Err(PersistError {
            failed: self.failures.len(),
            attempted: self.attempted,
            detail,
        })
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Persist every payload-carrying outcome in `results` under `plan`.
///
/// Payload bytes are written verbatim — exported configuration must
/// round-trip byte for byte. Hosts without a payload are skipped rather than
/// producing empty files; failure outcomes that carry diagnostic bytes are
/// written like any other payload. A write that fails (permissions, path
/// collisions) is recorded against that host only; every other host is still
/// attempted.
pub fn persist<S: EventSink + ?Sized>(
    results: &ResultMap,
    plan: &ArtifactPlan,
    sink: &S,
) -> PersistReport {
    let mut report = PersistReport::default();

    for (host, outcome) in results.iter() {
        let Some(bytes) = outcome.payload_bytes() else {
            continue;
        };
        report.attempted += 1;
        match write_one(plan, host, bytes) {
            Ok(path) => {
                sink.emit(&DispatchEvent::ArtifactWritten {
                    host: host.to_string(),
                    path: path.clone(),
                    bytes: bytes.len(),
                });
                report.written.push(WrittenArtifact {
                    host: host.to_string(),
                    path,
                    bytes: bytes.len(),
                    sha256: sha256_hex(bytes),
                });
            }
            Err(reason) => {
                sink.emit(&DispatchEvent::ArtifactFailed {
                    host: host.to_string(),
                    message: reason.clone(),
                });
                report.failures.push((host.to_string(), reason));
            }
        }
    }

    report
}

fn write_one(plan: &ArtifactPlan, host: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    let path = plan.path_for(host);
    if path.exists() {
        return Err(format!("{} already exists", path.display()));
    }
    if let Some(parent) = path.parent() {
        // create_dir_all is idempotent, so concurrent invocations sharing a
        // parent directory cannot trip each other up here.
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("creating {}: {e}", parent.display()))?;
    }
    std::fs::write(&path, bytes).map_err(|e| format!("writing {}: {e}", path.display()))?;
    Ok(path)
}

fn sha256_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{b:02x}");
    }
    out
}
