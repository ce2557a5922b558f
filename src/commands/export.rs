//! `armada export` — export a service or object from a domain on each
//! appliance, writing one package per host.

use std::path::PathBuf;
use std::str::FromStr as _;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{EventSink, FanoutSink};
use crate::application::services::artifacts::{self, ArtifactPlan};
use crate::commands;
use crate::domain::action::{ActionRequest, ExportConfig, PackageFormat};
use crate::domain::timestamp::TimestampToken;
use crate::infra::telemetry::{RecordingSink, TracingSink};
use crate::output::human::HumanRenderer;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub fleet: commands::FleetArgs,

    /// Domain from which to export the service or object
    #[arg(long)]
    pub domain: String,

    /// Name of the object to export
    #[arg(long)]
    pub object: String,

    /// Class of the object to export
    #[arg(long)]
    pub object_class: String,

    /// Comment embedded into the export
    #[arg(long, default_value = "")]
    pub comment: String,

    /// Export format
    #[arg(long, default_value = "ZIP", value_parser = PackageFormat::from_str, value_name = "XML|ZIP")]
    pub format: PackageFormat,

    /// Export the running configuration instead of the persisted one
    #[arg(long)]
    pub running: bool,

    /// Leave out files not directly referenced by the object
    #[arg(long)]
    pub no_all_files: bool,

    /// Leave out referenced files
    #[arg(long)]
    pub no_referenced_files: bool,

    /// Leave out referenced objects
    #[arg(long)]
    pub no_referenced_objects: bool,

    /// Directory export packages are written under
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Run `armada export`.
///
/// # Errors
///
/// Returns an error on invalid fleet arguments, any failed artifact write,
/// or — in console mode — when any appliance reported a failure.
pub async fn run(args: &ExportArgs, app: &AppContext) -> Result<()> {
    let targets = args.fleet.target_set(app)?;

    let request = Arc::new(ActionRequest::Export(ExportConfig {
        domain: args.domain.clone(),
        object: args.object.clone(),
        object_class: args.object_class.clone(),
        comment: args.comment.clone(),
        format: args.format,
        persisted: !args.running,
        all_files: !args.no_all_files,
        referenced_files: !args.no_referenced_files,
        referenced_objects: !args.no_referenced_objects,
    }));

    let recording = RecordingSink::new();
    let tracing_sink = TracingSink;
    let sinks: [&dyn EventSink; 2] = [&tracing_sink, &recording];
    let fan = FanoutSink::new(&sinks);

    let results = commands::dispatch_fleet(app, &targets, &request, &fan).await;

    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| app.defaults.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from("tmp"));
    let plan = ArtifactPlan::export(
        &out_dir,
        TimestampToken::now(),
        &args.object,
        args.format.ext(),
    );
    let report = artifacts::persist(&results, &plan, &fan);

    if app.is_web() {
        commands::print_web_report(
            "Export results",
            request.op_label(),
            &results,
            Some(&report.written),
            &recording.snapshot(),
        );
        report.into_result()?;
        return Ok(());
    }

    let renderer = HumanRenderer::new(&app.output);
    renderer.render_results(&results);
    renderer.render_artifacts(&report);
    renderer.render_summary(&results);
    report.into_result()?;
    commands::fail_if_any_failed(&results)
}
