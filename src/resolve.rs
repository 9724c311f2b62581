//! Branch name resolution from merge messages.

use regex::Regex;
use std::sync::LazyLock;

static MERGE_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Merge\s+branch\s+'([^']+)'").expect("valid pattern"));

/// Extract the feature branch name from a pending merge message.
///
/// Matches the conventional `Merge branch '<name>'` form git writes to
/// `MERGE_MSG` and returns the first capture. Messages that do not follow
/// that form (octopus merges, hand-edited messages) yield `None`.
pub fn extract_feature_branch(merge_message: &str) -> Option<String> {
    MERGE_BRANCH
        .captures(merge_message)
        .map(|caps| caps[1].to_string())
}
