//! Mock review service for gate tests.
//!
//! Manually implements [`ReviewService`] with configurable responses, call
//! tracking, and error injection for failure path testing.

use async_trait::async_trait;
use gh_gate::error::{Error, Result};
use gh_gate::review::ReviewService;
use gh_gate::types::{CheckResult, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Configurable in-memory [`ReviewService`].
pub struct MockReviewService {
    available: Mutex<bool>,
    find_pr_responses: Mutex<HashMap<String, PullRequest>>,
    rollup_responses: Mutex<HashMap<u64, Vec<CheckResult>>>,
    email_responses: Mutex<HashMap<u64, Vec<String>>>,
    // Call tracking
    find_pr_calls: Mutex<Vec<String>>,
    rollup_calls: Mutex<Vec<u64>>,
    email_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_find_pr: Mutex<Option<String>>,
    error_on_rollup: Mutex<Option<String>>,
    error_on_emails: Mutex<Option<String>>,
}

impl MockReviewService {
    pub fn new() -> Self {
        Self {
            available: Mutex::new(true),
            find_pr_responses: Mutex::new(HashMap::new()),
            rollup_responses: Mutex::new(HashMap::new()),
            email_responses: Mutex::new(HashMap::new()),
            find_pr_calls: Mutex::new(Vec::new()),
            rollup_calls: Mutex::new(Vec::new()),
            email_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
            error_on_rollup: Mutex::new(None),
            error_on_emails: Mutex::new(None),
        }
    }

    // === Response configuration ===

    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }

    pub fn add_pr(&self, branch: &str, pr: PullRequest) {
        self.find_pr_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), pr);
    }

    pub fn set_rollup(&self, pr_number: u64, rollup: Vec<CheckResult>) {
        self.rollup_responses.lock().unwrap().insert(pr_number, rollup);
    }

    pub fn set_emails(&self, pr_number: u64, emails: Vec<String>) {
        self.email_responses.lock().unwrap().insert(pr_number, emails);
    }

    // === Error injection ===

    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_rollup(&self, msg: &str) {
        *self.error_on_rollup.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_emails(&self, msg: &str) {
        *self.error_on_emails.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn find_pr_calls(&self) -> Vec<String> {
        self.find_pr_calls.lock().unwrap().clone()
    }

    pub fn rollup_calls(&self) -> Vec<u64> {
        self.rollup_calls.lock().unwrap().clone()
    }

    pub fn email_calls(&self) -> Vec<u64> {
        self.email_calls.lock().unwrap().clone()
    }

    /// Total number of query calls (availability probes excluded).
    pub fn total_calls(&self) -> usize {
        self.find_pr_calls().len() + self.rollup_calls().len() + self.email_calls().len()
    }
}

#[async_trait]
impl ReviewService for MockReviewService {
    async fn is_available(&self) -> bool {
        *self.available.lock().unwrap()
    }

    async fn find_pull_request(&self, branch: &str) -> Result<Option<PullRequest>> {
        self.find_pr_calls.lock().unwrap().push(branch.to_string());
        if let Some(msg) = self.error_on_find_pr.lock().unwrap().clone() {
            return Err(Error::ReviewServiceQueryFailed(msg));
        }
        Ok(self.find_pr_responses.lock().unwrap().get(branch).cloned())
    }

    async fn fetch_check_rollup(&self, pr_number: u64) -> Result<Vec<CheckResult>> {
        self.rollup_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_rollup.lock().unwrap().clone() {
            return Err(Error::ReviewServiceQueryFailed(msg));
        }
        Ok(self
            .rollup_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_commit_emails(&self, pr_number: u64) -> Result<Vec<String>> {
        self.email_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_emails.lock().unwrap().clone() {
            return Err(Error::ReviewServiceQueryFailed(msg));
        }
        Ok(self
            .email_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }
}
