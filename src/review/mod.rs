//! Review-service client for pull request and check data.
//!
//! The trait abstracts the external review host so the gate logic can be
//! tested against a mock implementation.

mod gh;

pub use gh::GhClient;

use crate::error::Result;
use crate::types::{CheckResult, PullRequest};
use async_trait::async_trait;

/// Client for the service hosting pull requests and their check results.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Verify the service tooling is installed and authenticated.
    ///
    /// Unavailability is a hard reject for the gate, not a retryable
    /// condition.
    async fn is_available(&self) -> bool;

    /// Find the open pull request whose head is `branch`.
    ///
    /// The service defines no ordering when several match, so the first one
    /// returned wins. Zero matches is `Ok(None)`, not an error.
    async fn find_pull_request(&self, branch: &str) -> Result<Option<PullRequest>>;

    /// Fetch the status-check rollup for a pull request.
    ///
    /// Empty when the service reports no rollup yet.
    async fn fetch_check_rollup(&self, pr_number: u64) -> Result<Vec<CheckResult>>;

    /// Fetch the commit author emails recorded for a pull request.
    async fn fetch_commit_emails(&self, pr_number: u64) -> Result<Vec<String>>;
}
