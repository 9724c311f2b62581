//! Author/organization membership filtering.
//!
//! The gate only enforces check status for changes that originate inside the
//! configured organization; external contributions skip the check entirely.
//! Any lookup failure counts as "not a member", so a broken query can never
//! block on membership grounds.

use crate::repo::GitRepo;
use crate::review::ReviewService;
use tracing::{debug, warn};

/// Which commits decide membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipPolicy {
    /// Decide on the first non-merge commit in `base..feature`.
    #[default]
    FirstNonMergeCommit,
    /// Require every commit author reported for the pull request to match.
    ///
    /// This legacy policy needs a resolved pull request, so it is evaluated
    /// after PR lookup rather than from local history.
    AllPullRequestAuthors,
}

/// Filter deciding whether a change comes from the allowed author domain.
#[derive(Debug, Clone)]
pub struct MembershipFilter {
    domain: Option<String>,
    policy: MembershipPolicy,
}

impl MembershipFilter {
    /// Create a filter for `domain` under `policy`.
    ///
    /// A leading `@` on the domain is tolerated. With no domain configured
    /// the filter is disabled: every author counts as a member and the gate
    /// always applies.
    pub fn new(domain: Option<String>, policy: MembershipPolicy) -> Self {
        let domain = domain.map(|d| d.trim_start_matches('@').to_string());
        Self { domain, policy }
    }

    /// Whether a domain is configured.
    pub const fn is_enabled(&self) -> bool {
        self.domain.is_some()
    }

    /// The active policy.
    pub const fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// Decide membership from the commit range `base..feature`.
    ///
    /// Walks the proposed change set oldest first, skips merge commits, and
    /// decides on the first remaining commit's committer email. An empty
    /// range or any lookup failure means "not a member".
    pub async fn allows_range(&self, repo: &GitRepo, base: &str, feature: &str) -> bool {
        let Some(domain) = self.domain.as_deref() else {
            return true;
        };
        let commits = match repo.commits_in_range(base, feature).await {
            Ok(commits) => commits,
            Err(e) => {
                warn!(error = %e, "commit range lookup failed; treating author as external");
                return false;
            }
        };
        let Some(first) = commits.iter().find(|c| !c.is_merge()) else {
            debug!("no non-merge commits in range; treating author as external");
            return false;
        };
        email_in_domain(&first.committer_email, domain)
    }

    /// Decide membership from the pull request's reported authorship.
    ///
    /// Every author email must match the domain. An empty author list or any
    /// lookup failure means "not a member".
    pub async fn allows_pull_request(&self, review: &dyn ReviewService, pr_number: u64) -> bool {
        let Some(domain) = self.domain.as_deref() else {
            return true;
        };
        let emails = match review.fetch_commit_emails(pr_number).await {
            Ok(emails) => emails,
            Err(e) => {
                warn!(error = %e, "authorship lookup failed; treating author as external");
                return false;
            }
        };
        if emails.is_empty() {
            return false;
        }
        emails.iter().all(|email| email_in_domain(email, domain))
    }
}

fn email_in_domain(email: &str, domain: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(_, d)| d.eq_ignore_ascii_case(domain))
}
