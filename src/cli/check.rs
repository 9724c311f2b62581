//! `gate check` - the merge-gate hook entry point.

use super::style::Stylize;
use anstream::println;
use anyhow::{Context, Result};
use clap::Args;
use gh_gate::cache::VerdictCache;
use gh_gate::command::{CommandRunner, SystemRunner};
use gh_gate::gate::{ConclusionPolicy, GateConfig, GateOutcome, MergeGate};
use gh_gate::membership::MembershipPolicy;
use gh_gate::repo::{GitRepo, RollbackMode};
use gh_gate::review::{GhClient, ReviewService};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for `gate check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Repository path (defaults to the current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Organization email domain; merges authored outside it skip the check
    #[arg(long)]
    org_domain: Option<String>,

    /// Which commits decide organization membership
    #[arg(long, value_enum, default_value_t = MembershipArg::FirstCommit)]
    membership: MembershipArg,

    /// Require an explicit SUCCESS conclusion instead of merely "not FAILURE"
    #[arg(long)]
    require_success: bool,

    /// Rollback strength on rejection
    #[arg(long, value_enum, default_value_t = RollbackArg::Abort)]
    rollback: RollbackArg,

    /// Override the verdict cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum MembershipArg {
    /// The first non-merge commit in the range decides
    FirstCommit,
    /// Every author reported for the pull request must match
    AllAuthors,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RollbackArg {
    /// Abort the merge and restore the pre-merge ref
    Abort,
    /// Leave the merge in place; only write a failure marker
    Marker,
}

/// Run the gate and report its outcome, returning the hook exit code.
pub async fn run(args: CheckArgs) -> Result<i32> {
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new(&args.path));
    let repo = GitRepo::open(runner.clone(), &args.path)
        .await
        .context("failed to open repository")?;
    let review: Arc<dyn ReviewService> = Arc::new(GhClient::new(runner));
    let cache = match args.cache_dir {
        Some(dir) => VerdictCache::at(dir),
        None => VerdictCache::open_default().context("failed to locate cache directory")?,
    };
    let config = GateConfig {
        org_domain: args.org_domain,
        membership: match args.membership {
            MembershipArg::FirstCommit => MembershipPolicy::FirstNonMergeCommit,
            MembershipArg::AllAuthors => MembershipPolicy::AllPullRequestAuthors,
        },
        conclusion: if args.require_success {
            ConclusionPolicy::RequireSuccess
        } else {
            ConclusionPolicy::FailureRejects
        },
        rollback: match args.rollback {
            RollbackArg::Abort => RollbackMode::AbortAndRestore,
            RollbackArg::Marker => RollbackMode::MarkerOnly,
        },
    };
    let gate = MergeGate::new(repo, review, cache, config);

    // A signal mid-run must not leave the repository mid-merge.
    let outcome = tokio::select! {
        outcome = gate.run() => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Interrupted; rolling back".warn());
            gate.rollback().await;
            return Ok(1);
        }
    };

    report(&outcome);
    Ok(outcome.exit_code())
}

fn report(outcome: &GateOutcome) {
    match outcome {
        GateOutcome::Allowed(reason) => {
            println!("{} {reason}", "✓".success());
        }
        GateOutcome::Blocked(reason) => {
            println!("{} {reason}", "✗".error());
            println!("{}", "Blocking the merge.".muted());
        }
    }
}
