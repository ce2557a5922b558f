//! Armada CLI - Fleet administration for network appliances

use clap::Parser;
use tracing_subscriber::EnvFilter;

use armada_cli::cli::Cli;

#[tokio::main]
async fn main() {
    // Quiet by default; RUST_LOG=info surfaces per-host dispatch events.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
