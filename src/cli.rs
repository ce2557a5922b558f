//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Fleet administration for network appliances
#[derive(Parser)]
#[command(
    name = "armada",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Render the report as a standalone HTML page on stdout
    #[arg(long, global = true)]
    pub web: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flush the document cache of an XML manager across the fleet
    FlushDocumentCache(commands::flush::FlushArgs),

    /// Flush the stylesheet cache of an XML manager across the fleet
    FlushStylesheetCache(commands::flush::FlushArgs),

    /// Import a service or object into a domain across the fleet
    Import(commands::import::ImportArgs),

    /// Export a service or object from a domain on each appliance
    Export(commands::export::ExportArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation is misconfigured, an artifact
    /// write fails, or — in console mode — any appliance reported a failure.
    pub async fn run(self) -> Result<()> {
        let Cli {
            web,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            web,
            quiet,
            no_color,
        })?;
        match command {
            Command::FlushDocumentCache(args) => commands::flush::run_document(&args, &app).await,
            Command::FlushStylesheetCache(args) => {
                commands::flush::run_stylesheet(&args, &app).await
            }
            Command::Import(args) => commands::import::run(&args, &app).await,
            Command::Export(args) => commands::export::run(&args, &app).await,
        }
    }
}
