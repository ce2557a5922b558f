//! `armada flush-document-cache` / `armada flush-stylesheet-cache` — flush
//! an XML manager's cache in one domain across the fleet.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{EventSink, FanoutSink};
use crate::commands;
use crate::domain::action::ActionRequest;
use crate::infra::telemetry::{RecordingSink, TracingSink};
use crate::output::human::HumanRenderer;

/// Arguments shared by both cache-flush commands.
#[derive(Args, Default)]
pub struct FlushArgs {
    #[command(flatten)]
    pub fleet: commands::FleetArgs,

    /// Domain where the XML manager resides
    #[arg(long)]
    pub domain: String,

    /// XML manager whose cache to flush
    #[arg(long)]
    pub xml_manager: String,
}

/// Run `armada flush-document-cache`.
///
/// # Errors
///
/// Returns an error on invalid fleet arguments, or — in console mode — when
/// any appliance reported a failure.
pub async fn run_document(args: &FlushArgs, app: &AppContext) -> Result<()> {
    let request = ActionRequest::FlushDocumentCache {
        domain: args.domain.clone(),
        xml_manager: args.xml_manager.clone(),
    };
    run(args, app, request).await
}

/// Run `armada flush-stylesheet-cache`.
///
/// # Errors
///
/// Returns an error on invalid fleet arguments, or — in console mode — when
/// any appliance reported a failure.
pub async fn run_stylesheet(args: &FlushArgs, app: &AppContext) -> Result<()> {
    let request = ActionRequest::FlushStylesheetCache {
        domain: args.domain.clone(),
        xml_manager: args.xml_manager.clone(),
    };
    run(args, app, request).await
}

async fn run(args: &FlushArgs, app: &AppContext, request: ActionRequest) -> Result<()> {
    let targets = args.fleet.target_set(app)?;
    let request = Arc::new(request);

    let recording = RecordingSink::new();
    let tracing_sink = TracingSink;
    let sinks: [&dyn EventSink; 2] = [&tracing_sink, &recording];
    let fan = FanoutSink::new(&sinks);

    let results = commands::dispatch_fleet(app, &targets, &request, &fan).await;

    if app.is_web() {
        commands::print_web_report(
            "Cache flush results",
            request.op_label(),
            &results,
            None,
            &recording.snapshot(),
        );
        return Ok(());
    }

    let renderer = HumanRenderer::new(&app.output);
    renderer.render_results(&results);
    renderer.render_summary(&results);
    commands::fail_if_any_failed(&results)
}
