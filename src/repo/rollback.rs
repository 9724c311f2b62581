//! Rollback to the pre-merge state.

use super::GitRepo;
use super::state::MERGE_MARKERS;
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// How strongly to unwind a rejected merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackMode {
    /// Abort the merge, clear merge markers, and restore the pre-merge ref.
    #[default]
    AbortAndRestore,
    /// Leave the merge in place and only persist a failure marker.
    MarkerOnly,
}

/// Filename of the failure marker written under [`RollbackMode::MarkerOnly`].
const FAILURE_MARKER: &str = "GATE_REJECTED";

impl GitRepo {
    /// Unwind the in-progress merge according to `mode`.
    ///
    /// Best-effort: individual command failures are logged and skipped so a
    /// partially torn-down merge still gets as close to clean as possible.
    pub async fn rollback(&self, mode: RollbackMode) -> Result<()> {
        match mode {
            RollbackMode::AbortAndRestore => self.abort_and_restore().await,
            RollbackMode::MarkerOnly => self.write_failure_marker().await,
        }
    }

    async fn abort_and_restore(&self) -> Result<()> {
        debug!("rolling back to pre-merge state");
        self.best_effort("git", &["merge", "--abort"]).await;
        self.best_effort("git", &["reset", "--hard"]).await;

        // `merge --abort` normally clears these, but not when the merge
        // state is already half torn down.
        let git_dir = self.git_dir().await?;
        for marker in MERGE_MARKERS {
            remove_if_present(&git_dir.join(marker)).await;
        }

        self.best_effort("git", &["checkout", "-"]).await;
        Ok(())
    }

    async fn write_failure_marker(&self) -> Result<()> {
        let git_dir = self.git_dir().await?;
        fs::write(git_dir.join(FAILURE_MARKER), "checks failed\n").await?;
        Ok(())
    }

    async fn best_effort(&self, program: &str, args: &[&str]) {
        match self.runner().run(program, args).await {
            Ok(output) if output.success => {}
            Ok(output) => {
                warn!(program, ?args, stderr = %output.stderr, "rollback command failed");
            }
            Err(e) => {
                warn!(program, ?args, error = %e, "rollback command failed");
            }
        }
    }
}

async fn remove_if_present(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove merge marker");
        }
    }
}
