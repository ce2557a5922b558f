//! Typed action requests.
//!
//! One structured parameter type per action kind, validated at construction,
//! replacing a free-form parameter bag with a tagged variant the dispatcher
//! and transport can match on.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ── File formats ──────────────────────────────────────────────────────────────

/// Configuration package format accepted and produced by appliances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageFormat {
    Xml,
    Zip,
}

impl PackageFormat {
    /// File extension used for persisted artifacts.
    #[must_use]
    pub fn ext(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Zip => "zip",
        }
    }
}

impl FromStr for PackageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "XML" => Ok(Self::Xml),
            "ZIP" => Ok(Self::Zip),
            other => Err(format!("unknown format '{other}': expected XML or ZIP")),
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => f.write_str("XML"),
            Self::Zip => f.write_str("ZIP"),
        }
    }
}

// ── Per-action parameters ─────────────────────────────────────────────────────

/// Parameters for a configuration import.
///
/// `content` is the package bytes exactly as read from disk; they reach the
/// appliance unmodified (base64 on the wire, decoded on arrival).
#[derive(Debug, Clone, Serialize)]
pub struct ImportConfig {
    pub domain: String,
    pub source_type: PackageFormat,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub deployment_policy: Option<String>,
    pub dry_run: bool,
    pub overwrite_files: bool,
    pub overwrite_objects: bool,
    pub rewrite_local_ip: bool,
}

/// Parameters for a configuration export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportConfig {
    pub domain: String,
    pub object: String,
    pub object_class: String,
    pub comment: String,
    pub format: PackageFormat,
    pub persisted: bool,
    pub all_files: bool,
    pub referenced_files: bool,
    pub referenced_objects: bool,
}

// ── Action request ────────────────────────────────────────────────────────────

/// The named operation plus its parameters, shared read-only across every
/// target in one invocation.
#[derive(Debug, Clone)]
pub enum ActionRequest {
    FlushDocumentCache { domain: String, xml_manager: String },
    FlushStylesheetCache { domain: String, xml_manager: String },
    Import(ImportConfig),
    Export(ExportConfig),
}

impl ActionRequest {
    /// Operation identifier sent to the appliance management endpoint.
    #[must_use]
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::FlushDocumentCache { .. } => "FlushDocumentCache",
            Self::FlushStylesheetCache { .. } => "FlushStylesheetCache",
            Self::Import(_) => "Import",
            Self::Export(_) => "Export",
        }
    }

    /// Stable label used in log fields, result-table suffixes, and artifact
    /// directory names.
    #[must_use]
    pub fn op_label(&self) -> &'static str {
        match self {
            Self::FlushDocumentCache { .. } => "flush_document_cache",
            Self::FlushStylesheetCache { .. } => "flush_stylesheet_cache",
            Self::Import(_) => "import",
            Self::Export(_) => "export",
        }
    }

    /// Extension of the artifact this action produces, if any. Imports return
    /// an XML result report; exports return a package in the requested
    /// format; cache flushes return only an acknowledgement.
    #[must_use]
    pub fn artifact_ext(&self) -> Option<&'static str> {
        match self {
            Self::FlushDocumentCache { .. } | Self::FlushStylesheetCache { .. } => None,
            Self::Import(_) => Some(PackageFormat::Xml.ext()),
            Self::Export(cfg) => Some(cfg.format.ext()),
        }
    }

    /// The parameter bag serialized for the wire, excluding any file payload
    /// (the transport attaches that separately).
    ///
    /// # Panics
    ///
    /// Never panics: every variant serializes from plain structs with string
    /// keys.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn parameters(&self) -> serde_json::Value {
        match self {
            Self::FlushDocumentCache { domain, xml_manager }
            | Self::FlushStylesheetCache { domain, xml_manager } => serde_json::json!({
                "domain": domain,
                "xml_manager": xml_manager,
            }),
            Self::Import(cfg) => serde_json::to_value(cfg).expect("plain struct"),
            Self::Export(cfg) => serde_json::to_value(cfg).expect("plain struct"),
        }
    }

    /// File payload carried by this action, if any.
    #[must_use]
    pub fn attachment(&self) -> Option<&[u8]> {
        match self {
            Self::Import(cfg) => Some(&cfg.content),
            _ => None,
        }
    }
}
