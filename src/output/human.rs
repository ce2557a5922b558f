//! Line-oriented console report: one pass/fail block per host.

use owo_colors::OwoColorize as _;

use crate::application::services::artifacts::PersistReport;
use crate::domain::outcome::{Outcome, ResultMap};
use crate::output::OutputContext;

/// Renders result maps and artifact reports as terminal output.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Print one block per host, in result-map order, failures included —
    /// the report never stops at the first failure.
    pub fn render_results(&self, results: &ResultMap) {
        if self.ctx.quiet {
            return;
        }
        for (host, outcome) in results.iter() {
            println!();
            println!("{host}");
            println!("{}", "=".repeat(host.len()));
            match outcome {
                Outcome::Success { .. } => {
                    println!("{}", "OK".style(self.ctx.styles.success));
                }
                Outcome::Failure(detail) => {
                    println!("{}", "FAILURE".style(self.ctx.styles.error));
                    println!("{}", detail.message);
                }
            }
        }
        println!();
    }

    /// Print where each host's artifact landed, then any write failures.
    pub fn render_artifacts(&self, report: &PersistReport) {
        for artifact in &report.written {
            self.ctx
                .kv(&format!("{}:", artifact.host), &artifact.path.display().to_string());
        }
        for (host, reason) in &report.failures {
            self.ctx.error(&format!("{host}: {reason}"));
        }
    }

    /// One-line verdict for the whole invocation.
    pub fn render_summary(&self, results: &ResultMap) {
        if results.is_empty() {
            self.ctx.info("No appliances targeted.");
            return;
        }
        let failed = results.failed_count();
        if failed == 0 {
            self.ctx
                .success(&format!("{} appliance(s) succeeded", results.len()));
        } else {
            self.ctx
                .warn(&format!("{failed} of {} appliance(s) failed", results.len()));
        }
    }
}

/// Plain-text form of one host's block, used where styling is unavailable.
#[must_use]
pub fn host_block(host: &str, outcome: &Outcome) -> String {
    let underline = "=".repeat(host.len());
    match outcome {
        Outcome::Success { .. } => format!("{host}\n{underline}\nOK\n"),
        Outcome::Failure(detail) => {
            format!("{host}\n{underline}\nFAILURE\n{}\n", detail.message)
        }
    }
}
