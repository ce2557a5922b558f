//! Command implementations

pub mod export;
pub mod flush;
pub mod import;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::app::AppContext;
use crate::application::ports::EventSink;
use crate::application::services::dispatch;
use crate::domain::action::ActionRequest;
use crate::domain::outcome::ResultMap;
use crate::domain::target::TargetSet;
use crate::output::progress;

/// Timeout applied when neither the flag nor the config file names one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Fleet-selection flags shared by every command.
#[derive(Args, Default)]
pub struct FleetArgs {
    /// Appliance address (host or host:port); repeat per appliance
    #[arg(long = "appliance", value_name = "ADDRESS")]
    pub appliances: Vec<String>,

    /// Credential as user:secret; one for all appliances, or one per appliance
    #[arg(long = "credential", value_name = "USER:SECRET")]
    pub credentials: Vec<String>,

    /// Per-appliance timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (self-signed appliance certs)
    #[arg(long)]
    pub no_check_hostname: bool,
}

impl FleetArgs {
    /// Build the target set, merging flags with configured defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::error::TargetError`] before any network
    /// call when addresses, credentials, or the timeout are invalid.
    pub fn target_set(&self, app: &AppContext) -> Result<TargetSet> {
        let timeout = self
            .timeout
            .or(app.defaults.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let verify_hostname = if self.no_check_hostname {
            false
        } else {
            app.defaults.verify_hostname.unwrap_or(true)
        };
        let set = TargetSet::build(
            &self.appliances,
            &self.credentials,
            Duration::from_secs(timeout),
            verify_hostname,
        )?;
        Ok(set)
    }
}

/// Cancellation token cancelled on Ctrl-C, so in-flight per-host calls wind
/// down cooperatively and unfinished hosts are reported as cancelled.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}

/// Dispatch `request` to the fleet with a spinner in interactive console
/// mode.
pub async fn dispatch_fleet<S: EventSink + ?Sized>(
    app: &AppContext,
    targets: &TargetSet,
    request: &Arc<ActionRequest>,
    sink: &S,
) -> ResultMap {
    let cancel = shutdown_token();
    let spinner = (!app.is_web() && app.output.show_progress()).then(|| {
        progress::spinner(&format!(
            "Dispatching {} to {} appliance(s)",
            request.op_label(),
            targets.len()
        ))
    });

    let results = dispatch::dispatch(&app.transport, targets, request, sink, &cancel).await;

    if let Some(pb) = spinner {
        let failed = results.failed_count();
        if failed == 0 {
            progress::finish_ok(&pb, &format!("{} appliance(s) answered", results.len()));
        } else {
            progress::finish_error(
                &pb,
                &format!("{failed} of {} appliance(s) failed", results.len()),
            );
        }
    }
    results
}

/// Print the standalone HTML report page for web mode.
pub fn print_web_report(
    title: &str,
    suffix: &str,
    results: &ResultMap,
    written: Option<&[crate::application::services::artifacts::WrittenArtifact]>,
    history: &[crate::infra::telemetry::HistoryEntry],
) {
    use crate::output::web;

    let mut sections = vec![web::render_results_table(results, suffix)];
    if let Some(written) = written {
        sections.push(web::render_download_table(written, suffix));
    }
    sections.push(web::render_history(history));
    println!("{}", web::render_page(title, &sections));
}

/// Console-mode exit policy: the report is printed in full first, then the
/// invocation fails if any host failed.
///
/// # Errors
///
/// Returns an error naming the failed host count when any outcome is a
/// failure.
pub fn fail_if_any_failed(results: &ResultMap) -> Result<()> {
    if results.any_failed() {
        anyhow::bail!(
            "{} of {} appliance(s) failed",
            results.failed_count(),
            results.len()
        );
    }
    Ok(())
}
