//! Error types for gh-gate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the merge gate and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// The target directory is not inside a git work tree.
    #[error("not a git repository: {}", .0.display())]
    NotAGitRepo(PathBuf),

    /// A merge is in progress but the merge message file is missing.
    #[error("merge in progress but merge message not found at {}", .0.display())]
    MissingMergeMessage(PathBuf),

    /// No branch name could be extracted from the merge message.
    #[error("could not extract a branch name from the merge message")]
    BranchNameNotFound,

    /// The review-service tool is missing or unauthenticated.
    #[error("review service unavailable: {0}")]
    ReviewServiceUnavailable(String),

    /// A review-service query failed after the tool was verified available.
    #[error("review service query failed: {0}")]
    ReviewServiceQueryFailed(String),

    /// An external command could not be spawned or exited non-zero.
    #[error("command failed: {command}\nstderr: {stderr}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// Captured stderr from the failed command.
        stderr: String,
    },

    /// The verdict cache could not be read or written.
    #[error("verdict cache error: {0}")]
    Cache(String),

    /// Structured output from an external tool could not be parsed.
    #[error("failed to parse command output: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gh-gate operations.
pub type Result<T> = std::result::Result<T, Error>;
