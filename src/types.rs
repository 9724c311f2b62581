//! Core types for gh-gate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context of an in-progress merge, read once per invocation.
///
/// Built by [`crate::repo::GitRepo::read_merge_context`] and immutable for
/// the rest of the run. Absence of a context (no merge in progress) is
/// represented by `Option<MergeContext>` at the reader, not by a flag here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeContext {
    /// The pending merge message.
    pub message: String,
    /// Branch being merged in, when the message matched the expected form.
    pub feature_branch: Option<String>,
    /// Branch being merged into (the current checkout).
    pub base_branch: String,
}

/// Conclusion reported for a single status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckConclusion {
    /// The check completed successfully.
    Success,
    /// The check completed and failed.
    Failure,
    /// The check was skipped.
    Skipped,
    /// Any conclusion this tool does not model (neutral, cancelled, ...).
    #[serde(other)]
    Other,
}

/// One entry of a pull request's status-check rollup.
///
/// Deserialized directly from the review service's JSON output. Check runs
/// report `name` where commit statuses report `context`; both map onto
/// [`CheckResult::context`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Name of the check context (a workflow or status name).
    #[serde(alias = "name")]
    pub context: String,
    /// Human-readable description, when the service provides one.
    #[serde(default)]
    pub description: String,
    /// Reported conclusion; `None` while the check is still running.
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,
    /// When the check finished; `None` while it is still running.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CheckResult {
    /// Conclusion with unknown or absent values folded to
    /// [`CheckConclusion::Other`].
    pub fn conclusion_or_other(&self) -> CheckConclusion {
        self.conclusion.unwrap_or(CheckConclusion::Other)
    }
}

/// A pull request, as much of it as the gate needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// PR number.
    pub number: u64,
    /// Head branch name.
    #[serde(default)]
    pub head_ref_name: String,
}

/// Pass/fail decision for one branch, derived from its latest check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Branch the verdict applies to.
    pub branch: String,
    /// Whether the branch's checks passed.
    pub passed: bool,
}

/// A commit in the `base..feature` range, as reported by the VCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Commit SHA.
    pub sha: String,
    /// Number of parents; more than one means a merge commit.
    pub parent_count: usize,
    /// Committer email.
    pub committer_email: String,
}

impl CommitInfo {
    /// Whether this commit is a merge commit.
    pub const fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}
