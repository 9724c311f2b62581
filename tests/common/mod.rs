//! Shared test fixtures.
//!
//! These are test utilities - not all may be used in every test binary but
//! are available for future test development.

#![allow(dead_code)]

mod fake_runner;
mod mock_review;

pub use fake_runner::FakeRunner;
pub use mock_review::MockReviewService;

use chrono::{TimeZone, Utc};
use gh_gate::cache::{VerdictCache, repository_id};
use gh_gate::gate::{GateConfig, MergeGate};
use gh_gate::repo::GitRepo;
use gh_gate::review::ReviewService;
use gh_gate::types::{CheckConclusion, CheckResult, PullRequest};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Build a check result completing at `ts` (seconds past the epoch).
pub fn make_check(context: &str, conclusion: CheckConclusion, ts: i64) -> CheckResult {
    CheckResult {
        context: context.to_string(),
        description: String::new(),
        conclusion: Some(conclusion),
        completed_at: Some(Utc.timestamp_opt(ts, 0).unwrap()),
    }
}

/// Build a pull request with the given number and head branch.
pub fn make_pr(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        head_ref_name: head.to_string(),
    }
}

/// A fake repository layout on disk plus scripted collaborators wired to it.
///
/// The git metadata directory is real (merge markers are files the gate
/// reads and removes), while every git/gh command is replayed by the
/// [`FakeRunner`] and [`MockReviewService`].
pub struct GateFixture {
    pub temp: TempDir,
    pub runner: Arc<FakeRunner>,
    pub review: Arc<MockReviewService>,
}

impl GateFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();

        let runner = Arc::new(FakeRunner::new());
        let root = temp.path().display().to_string();
        runner.respond_ok("git rev-parse --show-toplevel", &root);
        runner.respond_ok("git rev-parse --absolute-git-dir", &format!("{root}/.git"));
        runner.respond_ok("git rev-parse --abbrev-ref HEAD", "main");

        Self {
            temp,
            runner,
            review: Arc::new(MockReviewService::new()),
        }
    }

    /// Lay down the marker files of an in-progress merge.
    pub fn begin_merge(&self, message: &str) {
        let git = self.temp.path().join(".git");
        fs::write(git.join("MERGE_HEAD"), "0123abc\n").unwrap();
        fs::write(git.join("MERGE_MSG"), message).unwrap();
    }

    /// Path of the git metadata directory.
    pub fn git_dir(&self) -> std::path::PathBuf {
        self.temp.path().join(".git")
    }

    /// The verdict cache used by gates built from this fixture.
    pub fn cache(&self) -> VerdictCache {
        VerdictCache::at(self.temp.path().join("cache"))
    }

    /// Repository id the gate will compute for this fixture.
    pub fn repo_id(&self) -> String {
        repository_id(self.temp.path())
    }

    /// Build a gate over the fixture's collaborators.
    pub async fn gate(&self, config: GateConfig) -> MergeGate {
        let repo = GitRepo::open(self.runner.clone(), self.temp.path())
            .await
            .unwrap();
        let review: Arc<dyn ReviewService> = self.review.clone();
        MergeGate::new(repo, review, self.cache(), config)
    }

    /// Whether any `gh` command was run.
    pub fn ran_gh(&self) -> bool {
        self.runner.calls().iter().any(|c| c.starts_with("gh "))
    }
}
