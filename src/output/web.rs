//! Tabular web report: stateless HTML builders over the result map.
//!
//! These functions only shape data the core already guarantees (total host
//! coverage, stable order); nothing here serves files or talks to the
//! network. The stylesheet ships inside the binary.

use include_dir::{Dir, include_dir};

use crate::application::services::artifacts::WrittenArtifact;
use crate::domain::outcome::{Outcome, ResultMap};
use crate::infra::telemetry::HistoryEntry;

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// The embedded report stylesheet.
#[must_use]
pub fn stylesheet() -> &'static str {
    ASSETS
        .get_file("report.css")
        .and_then(include_dir::File::contents_utf8)
        .unwrap_or("")
}

/// Escape HTML metacharacters. Host names and error detail come from remote
/// input and must never reach the markup raw.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Per-host status table. `suffix` namespaces the table id so several
/// operations can land on one page.
#[must_use]
pub fn render_results_table(results: &ResultMap, suffix: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<table class=\"results\" id=\"{}_results\">\n", escape(suffix)
    ));
    html.push_str("  <tr><th>Appliance</th><th>Status</th><th>Detail</th></tr>\n");
    for (host, outcome) in results.iter() {
        let (status, detail) = match outcome {
            Outcome::Success { ack, payload, .. } => {
                let detail = match (ack, payload) {
                    (_, Some(bytes)) => format!("{} bytes", bytes.len()),
                    (Some(true), None) => "acknowledged".to_string(),
                    _ => String::new(),
                };
                ("ok", detail)
            }
            Outcome::Failure(detail) => ("failure", detail.message.clone()),
        };
        html.push_str(&format!(
            "  <tr class=\"{status}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(host),
            status.to_uppercase(),
            escape(&detail),
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Invocation history panel from the recording sink's snapshot.
#[must_use]
pub fn render_history(entries: &[HistoryEntry]) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"history\" id=\"history\">\n");
    html.push_str("  <tr><th>Time</th><th>Event</th></tr>\n");
    for entry in entries {
        html.push_str(&format!(
            "  <tr><td>{}</td><td>{}</td></tr>\n",
            entry.at.format("%H:%M:%S"),
            escape(&entry.line),
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Download-link table keyed by the artifact writer's path mapping, so the
/// page never recomputes path logic.
#[must_use]
pub fn render_download_table(written: &[WrittenArtifact], suffix: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<table class=\"downloads\" id=\"{}_downloads\">\n", escape(suffix)
    ));
    html.push_str("  <tr><th>Appliance</th><th>File</th><th>Size</th><th>SHA-256</th></tr>\n");
    for artifact in written {
        let path = artifact.path.display().to_string();
        html.push_str(&format!(
            "  <tr><td>{}</td><td><a href=\"{}\">see download</a></td><td>{}</td><td><code>{}</code></td></tr>\n",
            escape(&artifact.host),
            escape(&path),
            artifact.bytes,
            escape(&artifact.sha256),
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Wrap rendered sections into a standalone page with the embedded
/// stylesheet.
#[must_use]
pub fn render_page(title: &str, sections: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<style>\n{}</style>\n", stylesheet()));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    for section in sections {
        html.push_str(section);
    }
    html.push_str("</body>\n</html>\n");
    html
}
