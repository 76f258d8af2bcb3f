//! Core types for release-fanout

use serde::{Deserialize, Serialize};

/// Branch name; treated as an opaque string
pub type BranchName = String;

/// Everything needed to open one pull request
///
/// Built once per target branch and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSpec {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repository: String,
    /// PR title
    pub title: String,
    /// Branch the changes come from
    pub head: BranchName,
    /// Branch the PR is opened against
    pub base: BranchName,
}

/// A pull request created by the remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number, assigned by the remote
    pub number: u64,
    /// PR title
    pub title: String,
    /// Base branch name
    pub base_ref: BranchName,
    /// Head branch name
    pub head_ref: BranchName,
    /// Web URL for the PR
    pub html_url: String,
}

/// A repository visible to the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// `owner/name`
    pub full_name: String,
}

/// Remote repository coordinates
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    #[default]
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl std::str::FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            other => Err(format!("unknown merge method '{other}'")),
        }
    }
}

/// A failed item in a batch stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// What was attempted (PR title or title plus number)
    pub label: String,
    /// Error text reported by the remote
    pub error: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.label, self.error)
    }
}

/// Outcomes of one batch stage, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcomes {
    /// Labels of items that succeeded
    pub succeeded: Vec<String>,
    /// Items that failed
    pub failed: Vec<Failure>,
}

impl StageOutcomes {
    /// Record a success
    pub fn succeed(&mut self, label: impl Into<String>) {
        self.succeeded.push(label.into());
    }

    /// Record a failure
    pub fn fail(&mut self, label: impl Into<String>, error: impl Into<String>) {
        self.failed.push(Failure {
            label: label.into(),
            error: error.into(),
        });
    }

    /// Total number of recorded outcomes
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }
}
