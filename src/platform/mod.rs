//! Remote repository services
//!
//! The workflow only talks to the remote through [`PlatformService`], so
//! tests can substitute an in-memory implementation.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{MergeMethod, MergeResult, PullRequest, PullRequestSpec, RepositorySummary};
use async_trait::async_trait;

/// Platform service trait for PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List repositories visible to the authenticated user
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>>;

    /// Open a pull request described by `spec`
    async fn create_pr(&self, spec: &PullRequestSpec) -> Result<PullRequest>;

    /// Merge a PR by number with the given method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;
}
