//! `armada import` — import a service or object into a domain across the
//! fleet, keeping each appliance's result report.

use std::path::PathBuf;
use std::str::FromStr as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{EventSink, FanoutSink};
use crate::application::services::artifacts::{self, ArtifactPlan};
use crate::commands;
use crate::domain::action::{ActionRequest, ImportConfig, PackageFormat};
use crate::domain::timestamp::TimestampToken;
use crate::infra::telemetry::{RecordingSink, TracingSink};
use crate::output::human::HumanRenderer;

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub fleet: commands::FleetArgs,

    /// Domain into which the configuration will be imported
    #[arg(long)]
    pub domain: String,

    /// Package file to import; its format must match --source-type
    #[arg(long = "file-in", value_name = "PATH")]
    pub file_in: PathBuf,

    /// Deployment policy applied during the import (must already exist on
    /// the appliances)
    #[arg(long, value_name = "NAME")]
    pub deployment_policy: Option<String>,

    /// Validate the package without importing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep existing files instead of overwriting them
    #[arg(long)]
    pub no_overwrite_files: bool,

    /// Keep existing objects instead of overwriting them
    #[arg(long)]
    pub no_overwrite_objects: bool,

    /// Leave local IP addresses in the configuration untouched
    #[arg(long)]
    pub no_rewrite_local_ip: bool,

    /// Package format of --file-in
    #[arg(long, default_value = "ZIP", value_parser = PackageFormat::from_str, value_name = "XML|ZIP")]
    pub source_type: PackageFormat,

    /// Directory import result reports are written under
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Run `armada import`.
///
/// # Errors
///
/// Returns an error on invalid fleet arguments, an unreadable package file,
/// any failed artifact write, or — in console mode — when any appliance
/// reported a failure.
pub async fn run(args: &ImportArgs, app: &AppContext) -> Result<()> {
    let targets = args.fleet.target_set(app)?;
    let content = std::fs::read(&args.file_in)
        .with_context(|| format!("reading {}", args.file_in.display()))?;

    let request = Arc::new(ActionRequest::Import(ImportConfig {
        domain: args.domain.clone(),
        source_type: args.source_type,
        content,
        deployment_policy: args.deployment_policy.clone(),
        dry_run: args.dry_run,
        overwrite_files: !args.no_overwrite_files,
        overwrite_objects: !args.no_overwrite_objects,
        rewrite_local_ip: !args.no_rewrite_local_ip,
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
    let plan = ArtifactPlan::import_results(&out_dir, TimestampToken::now());
    let report = artifacts::persist(&results, &plan, &fan);

    if app.is_web() {
        commands::print_web_report(
            "Import results",
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
