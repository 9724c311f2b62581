//! The merge-gate decision engine.
//!
//! Composes repository state reading, branch resolution, membership
//! filtering, the verdict cache, and the review service into a single
//! accept-or-rollback decision. The orchestrator never propagates errors
//! past its boundary: every failure on the decision path is handled by
//! rolling back and reporting a blocked outcome.

pub mod verdict;

pub use verdict::{ConclusionPolicy, evaluate_rollup};

use crate::cache::{VerdictCache, repository_id};
use crate::error::{Error, Result};
use crate::membership::{MembershipFilter, MembershipPolicy};
use crate::repo::{GitRepo, RollbackMode};
use crate::review::ReviewService;
use crate::types::Verdict;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why the gate allowed the merge to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowReason {
    /// No merge is in progress; nothing to gate.
    NotMerging,
    /// The change comes from outside the allowed organization; checks are
    /// not required for external contributions.
    ExternalAuthor,
    /// No open pull request exists for the branch.
    NoPullRequest {
        /// The unmatched feature branch.
        branch: String,
    },
    /// The branch's checks passed.
    ChecksPassed {
        /// The evaluated feature branch.
        branch: String,
        /// Whether the verdict came from the cache.
        cached: bool,
    },
}

impl fmt::Display for AllowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMerging => write!(f, "no merge in progress"),
            Self::ExternalAuthor => write!(f, "external contribution; checks not required"),
            Self::NoPullRequest { branch } => {
                write!(f, "no open pull request for '{branch}'")
            }
            Self::ChecksPassed {
                branch,
                cached: true,
            } => write!(f, "checks passed for '{branch}' (cached)"),
            Self::ChecksPassed {
                branch,
                cached: false,
            } => write!(f, "checks passed for '{branch}'"),
        }
    }
}

/// Why the gate blocked the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Merge in progress but the merge message could not be read.
    MissingMergeMessage,
    /// No branch name could be extracted from the merge message.
    BranchNameNotFound,
    /// The review-service tool is missing or unauthenticated.
    ServiceUnavailable(String),
    /// A review-service query failed.
    QueryFailed(String),
    /// The branch's checks failed.
    ChecksFailed {
        /// The evaluated feature branch.
        branch: String,
        /// Whether the verdict came from the cache.
        cached: bool,
    },
    /// Any other failure on the gate's path.
    Unexpected(String),
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMergeMessage => write!(f, "merge message could not be read"),
            Self::BranchNameNotFound => {
                write!(f, "no branch name found in the merge message")
            }
            Self::ServiceUnavailable(msg) => write!(f, "review service unavailable: {msg}"),
            Self::QueryFailed(msg) => write!(f, "review service query failed: {msg}"),
            Self::ChecksFailed {
                branch,
                cached: true,
            } => write!(f, "checks failed for '{branch}' (cached)"),
            Self::ChecksFailed {
                branch,
                cached: false,
            } => write!(f, "checks failed for '{branch}'"),
            Self::Unexpected(msg) => write!(f, "unexpected failure: {msg}"),
        }
    }
}

impl From<Error> for BlockReason {
    fn from(e: Error) -> Self {
        match e {
            Error::MissingMergeMessage(_) => Self::MissingMergeMessage,
            Error::BranchNameNotFound => Self::BranchNameNotFound,
            Error::ReviewServiceUnavailable(msg) => Self::ServiceUnavailable(msg),
            Error::ReviewServiceQueryFailed(msg) => Self::QueryFailed(msg),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

/// Terminal outcome of a gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Allow the merge to continue.
    Allowed(AllowReason),
    /// Block the merge; the repository has been rolled back.
    Blocked(BlockReason),
}

impl GateOutcome {
    /// Process exit code for this outcome, following the hook convention:
    /// 0 allows the merge/push to continue, 1 blocks it.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Allowed(_) => 0,
            Self::Blocked(_) => 1,
        }
    }

    /// Whether the merge may proceed.
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Policy knobs for a gate run.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// Organization email domain; `None` disables membership filtering.
    pub org_domain: Option<String>,
    /// Which commits decide membership.
    pub membership: MembershipPolicy,
    /// How check conclusions map to pass/fail.
    pub conclusion: ConclusionPolicy,
    /// How strongly to unwind a rejected merge.
    pub rollback: RollbackMode,
}

/// The merge-gate orchestrator.
pub struct MergeGate {
    repo: GitRepo,
    review: Arc<dyn ReviewService>,
    cache: VerdictCache,
    config: GateConfig,
}

impl MergeGate {
    /// Build a gate over the given collaborators.
    pub fn new(
        repo: GitRepo,
        review: Arc<dyn ReviewService>,
        cache: VerdictCache,
        config: GateConfig,
    ) -> Self {
        Self {
            repo,
            review,
            cache,
            config,
        }
    }

    /// Run the gate to a terminal outcome.
    ///
    /// Never returns an error: failures become a blocked outcome, and every
    /// blocked outcome unwinds the merge before returning.
    pub async fn run(&self) -> GateOutcome {
        let outcome = match self.decide().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "gate failed");
                GateOutcome::Blocked(BlockReason::from(e))
            }
        };
        if !outcome.is_allowed() {
            self.rollback().await;
        }
        outcome
    }

    /// Unwind the in-progress merge using the configured rollback mode.
    pub async fn rollback(&self) {
        if let Err(e) = self.repo.rollback(self.config.rollback).await {
            warn!(error = %e, "rollback incomplete");
        }
    }

    async fn decide(&self) -> Result<GateOutcome> {
        // DetectingMerge
        let Some(ctx) = self.repo.read_merge_context().await? else {
            info!("no merge in progress; allowing");
            return Ok(GateOutcome::Allowed(AllowReason::NotMerging));
        };

        // ResolvingBranches
        let feature = ctx.feature_branch.ok_or(Error::BranchNameNotFound)?;
        let base = ctx.base_branch;
        debug!(feature = %feature, base = %base, "resolved merge branches");

        // FilteringMembership (the commit-range policy needs no PR)
        let filter = MembershipFilter::new(self.config.org_domain.clone(), self.config.membership);
        if filter.is_enabled()
            && filter.policy() == MembershipPolicy::FirstNonMergeCommit
            && !filter.allows_range(&self.repo, &base, &feature).await
        {
            info!(branch = %feature, "external contribution; skipping check");
            return Ok(GateOutcome::Allowed(AllowReason::ExternalAuthor));
        }

        // CheckingCache
        let repo_id = repository_id(self.repo.root());
        if let Some(passed) = self.cache.lookup(&repo_id, &feature)? {
            debug!(branch = %feature, passed, "cache hit");
            return Ok(Self::outcome_for(
                Verdict {
                    branch: feature,
                    passed,
                },
                true,
            ));
        }

        // QueryingService
        if !self.review.is_available().await {
            return Err(Error::ReviewServiceUnavailable(
                "gh is not installed or not authenticated (run `gh auth login`)".to_string(),
            ));
        }
        let Some(pr) = self.review.find_pull_request(&feature).await? else {
            info!(branch = %feature, "no open pull request; allowing");
            return Ok(GateOutcome::Allowed(AllowReason::NoPullRequest {
                branch: feature,
            }));
        };

        // The legacy membership policy decides on the PR's reported authors.
        if filter.is_enabled()
            && filter.policy() == MembershipPolicy::AllPullRequestAuthors
            && !filter
                .allows_pull_request(self.review.as_ref(), pr.number)
                .await
        {
            info!(pr_number = pr.number, "external contribution; skipping check");
            return Ok(GateOutcome::Allowed(AllowReason::ExternalAuthor));
        }

        let rollup = self.review.fetch_check_rollup(pr.number).await?;
        let verdict = Verdict {
            branch: feature,
            passed: evaluate_rollup(&rollup, self.config.conclusion),
        };

        // Deciding
        if let Err(e) = self.cache.store(&repo_id, &verdict.branch, verdict.passed) {
            warn!(error = %e, "failed to persist verdict");
        }
        Ok(Self::outcome_for(verdict, false))
    }

    fn outcome_for(verdict: Verdict, cached: bool) -> GateOutcome {
        if verdict.passed {
            GateOutcome::Allowed(AllowReason::ChecksPassed {
                branch: verdict.branch,
                cached,
            })
        } else {
            GateOutcome::Blocked(BlockReason::ChecksFailed {
                branch: verdict.branch,
                cached,
            })
        }
    }
}
