//! `gate cache` - inspect or clear cached verdicts.

use super::style::Stylize;
use anstream::println;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use gh_gate::cache::{VerdictCache, repository_id};
use gh_gate::command::{CommandRunner, SystemRunner};
use gh_gate::repo::GitRepo;
use std::path::PathBuf;
use std::sync::Arc;

/// Subcommands for `gate cache`.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Print cached verdicts for the repository
    Show(CacheArgs),
    /// Drop the repository's cached verdicts
    Clear(CacheArgs),
}

/// Common arguments for cache subcommands.
#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Repository path (defaults to the current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Override the verdict cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

/// Run a cache subcommand.
pub async fn run(command: CacheCommand) -> Result<()> {
    let (args, clear) = match command {
        CacheCommand::Show(args) => (args, false),
        CacheCommand::Clear(args) => (args, true),
    };

    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new(&args.path));
    let repo = GitRepo::open(runner, &args.path)
        .await
        .context("failed to open repository")?;
    let repo_id = repository_id(repo.root());
    let cache = match args.cache_dir {
        Some(dir) => VerdictCache::at(dir),
        None => VerdictCache::open_default().context("failed to locate cache directory")?,
    };

    if clear {
        cache.clear(&repo_id).context("failed to clear cache")?;
        println!("{}", "Cleared cached verdicts.".muted());
        return Ok(());
    }

    let entries = cache.entries(&repo_id).context("failed to read cache")?;
    if entries.is_empty() {
        println!("{}", "No cached verdicts.".muted());
        return Ok(());
    }
    for (branch, passed) in entries {
        let status = if passed {
            "passed".success()
        } else {
            "failed".error()
        };
        println!("{branch}: {status}");
    }
    Ok(())
}
