//! # rguard CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Region Guard CLI — region-gated membership admission toolchain.
///
/// Derives on-ledger identifiers and runs the end-to-end admission flow
/// against an in-process ledger.
#[derive(Parser, Debug)]
#[command(name = "rguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Derive region identifiers, nullifiers, and proof transcripts.
    Derive(rguard_cli::derive::DeriveArgs),
    /// Run the full admission workflow against an in-process ledger.
    Demo(rguard_cli::demo::DemoArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive(args) => rguard_cli::derive::run(&args),
        Commands::Demo(args) => rguard_cli::demo::run(&args).await,
    }
}
