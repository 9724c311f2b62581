//! Typed facade over the version-control command interface.
//!
//! Everything the gate needs from git goes through [`GitRepo`]: toplevel
//! discovery, merge-state reading, branch and commit-range queries, and the
//! rollback that unwinds a rejected merge.

mod rollback;
mod state;

pub use rollback::RollbackMode;

use crate::command::{CommandRunner, run_checked};
use crate::error::{Error, Result};
use crate::types::CommitInfo;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Handle to a git repository, backed by a [`CommandRunner`].
pub struct GitRepo {
    runner: Arc<dyn CommandRunner>,
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    ///
    /// Fails with [`Error::NotAGitRepo`] when `path` is not inside a work
    /// tree.
    pub async fn open(runner: Arc<dyn CommandRunner>, path: &Path) -> Result<Self> {
        let output = runner.run("git", &["rev-parse", "--show-toplevel"]).await?;
        if !output.success {
            return Err(Error::NotAGitRepo(path.to_path_buf()));
        }
        let root = PathBuf::from(output.stdout.trim());
        debug!(root = %root.display(), "opened repository");
        Ok(Self { runner, root })
    }

    /// The repository's root (toplevel) directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Borrow the underlying command runner.
    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Resolve the git metadata directory as an absolute path.
    pub async fn git_dir(&self) -> Result<PathBuf> {
        let dir = run_checked(
            self.runner.as_ref(),
            "git",
            &["rev-parse", "--absolute-git-dir"],
        )
        .await?;
        Ok(PathBuf::from(dir.trim()))
    }

    /// Name of the currently checked-out branch (the merge target).
    pub async fn current_branch(&self) -> Result<String> {
        let name = run_checked(
            self.runner.as_ref(),
            "git",
            &["rev-parse", "--abbrev-ref", "HEAD"],
        )
        .await?;
        Ok(name.trim().to_string())
    }

    /// Commits reachable from `feature` but not from `base`, oldest first,
    /// with parent counts and committer emails.
    pub async fn commits_in_range(&self, base: &str, feature: &str) -> Result<Vec<CommitInfo>> {
        let range = format!("{base}..{feature}");
        let stdout = run_checked(
            self.runner.as_ref(),
            "git",
            &["log", "--reverse", "--format=%H%x1f%P%x1f%ce", &range],
        )
        .await?;

        let mut commits = Vec::new();
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            let mut fields = line.split('\u{1f}');
            let sha = fields.next().unwrap_or_default().to_string();
            let parents = fields.next().unwrap_or_default();
            let committer_email = fields.next().unwrap_or_default().to_string();
            commits.push(CommitInfo {
                sha,
                parent_count: parents.split_whitespace().count(),
                committer_email,
            });
        }
        debug!(range = %range, count = commits.len(), "enumerated commit range");
        Ok(commits)
    }
}
