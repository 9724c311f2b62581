//! Command-line interface for the `gate` binary.

mod cache;
mod check;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Merge-time gate that verifies pull request status checks.
#[derive(Debug, Parser)]
#[command(
    name = "gate",
    version,
    about = "Merge-time gate that verifies pull request status checks"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the in-progress merge and allow it or roll it back
    Check(check::CheckArgs),
    /// Inspect or clear cached verdicts
    #[command(subcommand)]
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Dispatch to the selected subcommand, returning the process exit code.
    pub async fn run(self) -> Result<i32> {
        match self.command {
            Command::Check(args) => check::run(args).await,
            Command::Cache(command) => cache::run(command).await.map(|()| 0),
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to warnings only so hook output stays
/// quiet. Logs go to stderr to keep stdout for the gate's own report.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
