//! Merge-in-progress detection and merge message reading.

use super::GitRepo;
use crate::error::{Error, Result};
use crate::resolve::extract_feature_branch;
use crate::types::MergeContext;
use tokio::fs;
use tracing::debug;

/// Marker files git leaves in the metadata directory during a merge.
pub(super) const MERGE_MARKERS: [&str; 4] = ["MERGE_HEAD", "MERGE_MSG", "MERGE_MODE", "AUTO_MERGE"];

impl GitRepo {
    /// Read the merge context, or `None` when no merge is in progress.
    ///
    /// A merge is in progress iff `MERGE_HEAD` exists in the git dir. Fails
    /// with [`Error::MissingMergeMessage`] when a merge is in progress but
    /// `MERGE_MSG` is absent. Never mutates repository state.
    pub async fn read_merge_context(&self) -> Result<Option<MergeContext>> {
        let git_dir = self.git_dir().await?;
        if !git_dir.join("MERGE_HEAD").exists() {
            debug!("no merge in progress");
            return Ok(None);
        }

        let msg_path = git_dir.join("MERGE_MSG");
        if !msg_path.exists() {
            return Err(Error::MissingMergeMessage(msg_path));
        }
        let message = fs::read_to_string(&msg_path).await?;

        let feature_branch = extract_feature_branch(&message);
        let base_branch = self.current_branch().await?;
        debug!(feature = ?feature_branch, base = %base_branch, "merge in progress");

        Ok(Some(MergeContext {
            message,
            feature_branch,
            base_branch,
        }))
    }
}
