//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use release_fanout::error::{Error, RemoteApiError, Result};
use release_fanout::platform::PlatformService;
use release_fanout::types::{
    MergeMethod, MergeResult, PlatformConfig, PullRequest, PullRequestSpec, RepositorySummary,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// In-memory platform service
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Remote failure injection per base branch (create) and per PR (merge)
/// - Internal error injection for abort paths
/// - Optional artificial latency on merge
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    repositories: Mutex<Vec<RepositorySummary>>,
    // Call tracking
    create_pr_calls: Mutex<Vec<PullRequestSpec>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    list_repos_calls: AtomicU64,
    // Error injection
    create_failures: Mutex<HashMap<String, RemoteApiError>>,
    merge_failures: Mutex<HashMap<u64, RemoteApiError>>,
    declined_merges: Mutex<HashMap<u64, Option<String>>>,
    internal_error_on_create: Mutex<Option<String>>,
    internal_error_on_merge: Mutex<Option<String>>,
    merge_delay: Mutex<Option<Duration>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1),
            repositories: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            list_repos_calls: AtomicU64::new(0),
            create_failures: Mutex::new(HashMap::new()),
            merge_failures: Mutex::new(HashMap::new()),
            declined_merges: Mutex::new(HashMap::new()),
            internal_error_on_create: Mutex::new(None),
            internal_error_on_merge: Mutex::new(None),
            merge_delay: Mutex::new(None),
        }
    }

    /// Number assigned to the next created PR
    pub fn set_next_pr_number(&self, number: u64) {
        self.next_pr_number.store(number, Ordering::SeqCst);
    }

    /// Repositories returned by `list_repositories`
    pub fn set_repositories(&self, names: &[&str]) {
        *self.repositories.lock().unwrap() = names
            .iter()
            .map(|n| RepositorySummary {
                full_name: (*n).to_string(),
            })
            .collect();
    }

    // === Error injection methods ===

    /// Make `create_pr` fail for PRs against `base`
    pub fn fail_create_for_base(&self, base: &str, err: RemoteApiError) {
        self.create_failures
            .lock()
            .unwrap()
            .insert(base.to_string(), err);
    }

    /// Make `merge_pr` fail for `pr_number`
    pub fn fail_merge_for(&self, pr_number: u64, err: RemoteApiError) {
        self.merge_failures.lock().unwrap().insert(pr_number, err);
    }

    /// Make `merge_pr` answer `merged: false` for `pr_number`
    pub fn decline_merge_for(&self, pr_number: u64, message: Option<&str>) {
        self.declined_merges
            .lock()
            .unwrap()
            .insert(pr_number, message.map(ToString::to_string));
    }

    /// Make every `create_pr` call return a non-remote error
    pub fn internal_error_on_create(&self, msg: &str) {
        *self.internal_error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every `merge_pr` call return a non-remote error
    pub fn internal_error_on_merge(&self, msg: &str) {
        *self.internal_error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    /// Sleep this long inside every `merge_pr` call
    pub fn delay_merges(&self, delay: Duration) {
        *self.merge_delay.lock().unwrap() = Some(delay);
    }

    // === Call verification methods ===

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<PullRequestSpec> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Base branches of all `create_pr` calls, in call order
    pub fn created_bases(&self) -> Vec<String> {
        self.get_create_pr_calls()
            .into_iter()
            .map(|c| c.base)
            .collect()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// PR numbers of all `merge_pr` calls, in call order
    pub fn merged_numbers(&self) -> Vec<u64> {
        self.get_merge_pr_calls()
            .into_iter()
            .map(|c| c.pr_number)
            .collect()
    }

    /// Number of `list_repositories` calls
    pub fn list_repos_call_count(&self) -> u64 {
        self.list_repos_calls.load(Ordering::SeqCst)
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was NOT called for a specific PR
    pub fn assert_merge_not_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            !calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) NOT to be called but it was: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>> {
        self.list_repos_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.repositories.lock().unwrap().clone())
    }

    async fn create_pr(&self, spec: &PullRequestSpec) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(spec.clone());

        if let Some(msg) = self.internal_error_on_create.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        if let Some(err) = self.create_failures.lock().unwrap().get(&spec.base) {
            return Err(Error::Remote(err.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            title: spec.title.clone(),
            base_ref: spec.base.clone(),
            head_ref: spec.head.clone(),
            html_url: format!(
                "https://github.com/{}/{}/pull/{number}",
                self.config.owner, self.config.repo
            ),
        })
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        let delay = *self.merge_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(msg) = self.internal_error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::Internal(msg.clone()));
        }
        if let Some(err) = self.merge_failures.lock().unwrap().get(&pr_number) {
            return Err(Error::Remote(err.clone()));
        }
        if let Some(message) = self.declined_merges.lock().unwrap().get(&pr_number) {
            return Ok(MergeResult {
                merged: false,
                sha: None,
                message: message.clone(),
            });
        }

        Ok(MergeResult {
            merged: true,
            sha: Some(format!("merged_sha_{pr_number}")),
            message: None,
        })
    }
}
