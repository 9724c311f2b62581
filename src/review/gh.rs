//! GitHub review service driven through the `gh` CLI.

use super::ReviewService;
use crate::command::CommandRunner;
use crate::error::{Error, Result};
use crate::types::{CheckResult, PullRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Review service backed by the installed `gh` binary.
///
/// All queries go through `gh … --json` and are consumed as structured
/// data, never as raw text.
pub struct GhClient {
    runner: Arc<dyn CommandRunner>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RollupView {
    // gh reports `null` rather than `[]` when no rollup exists yet.
    #[serde(default)]
    status_check_rollup: Option<Vec<CheckResult>>,
}

#[derive(Deserialize)]
struct CommitsView {
    #[serde(default)]
    commits: Vec<CommitEntry>,
}

#[derive(Deserialize)]
struct CommitEntry {
    #[serde(default)]
    authors: Vec<AuthorEntry>,
}

#[derive(Deserialize)]
struct AuthorEntry {
    #[serde(default)]
    email: String,
}

impl GhClient {
    /// Create a client that invokes `gh` through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn gh_json(&self, args: &[&str]) -> Result<String> {
        let output = self
            .runner
            .run("gh", args)
            .await
            .map_err(|e| Error::ReviewServiceQueryFailed(e.to_string()))?;
        if !output.success {
            return Err(Error::ReviewServiceQueryFailed(format!(
                "gh {}: {}",
                args.join(" "),
                output.stderr
            )));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl ReviewService for GhClient {
    async fn is_available(&self) -> bool {
        let installed = matches!(
            self.runner.run("gh", &["--version"]).await,
            Ok(o) if o.success
        );
        if !installed {
            debug!("gh CLI not installed");
            return false;
        }
        let authenticated = matches!(
            self.runner.run("gh", &["auth", "status"]).await,
            Ok(o) if o.success
        );
        if !authenticated {
            debug!("gh CLI not authenticated");
        }
        authenticated
    }

    async fn find_pull_request(&self, branch: &str) -> Result<Option<PullRequest>> {
        debug!(branch, "searching for pull request");
        let stdout = self
            .gh_json(&["pr", "list", "--head", branch, "--json", "number,headRefName"])
            .await?;
        let prs: Vec<PullRequest> = serde_json::from_str(&stdout).map_err(|e| {
            Error::ReviewServiceQueryFailed(format!("unexpected pr list output: {e}"))
        })?;

        // The service defines no ordering for multiple matches; take the first.
        let pr = prs.into_iter().next();
        match &pr {
            Some(pr) => debug!(pr_number = pr.number, "found pull request"),
            None => debug!(branch, "no open pull request"),
        }
        Ok(pr)
    }

    async fn fetch_check_rollup(&self, pr_number: u64) -> Result<Vec<CheckResult>> {
        debug!(pr_number, "fetching check rollup");
        let number = pr_number.to_string();
        let stdout = self
            .gh_json(&["pr", "view", &number, "--json", "statusCheckRollup"])
            .await?;
        let view: RollupView = serde_json::from_str(&stdout).map_err(|e| {
            Error::ReviewServiceQueryFailed(format!("unexpected rollup output: {e}"))
        })?;
        let rollup = view.status_check_rollup.unwrap_or_default();
        debug!(pr_number, count = rollup.len(), "fetched check rollup");
        Ok(rollup)
    }

    async fn fetch_commit_emails(&self, pr_number: u64) -> Result<Vec<String>> {
        debug!(pr_number, "fetching commit authorship");
        let number = pr_number.to_string();
        let stdout = self
            .gh_json(&["pr", "view", &number, "--json", "commits"])
            .await?;
        let view: CommitsView = serde_json::from_str(&stdout).map_err(|e| {
            Error::ReviewServiceQueryFailed(format!("unexpected commits output: {e}"))
        })?;
        Ok(view
            .commits
            .into_iter()
            .flat_map(|c| c.authors)
            .map(|a| a.email)
            .filter(|e| !e.is_empty())
            .collect())
    }
}
