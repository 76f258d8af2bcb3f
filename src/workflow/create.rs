//! Batch PR creation
//!
//! Opens one pull request per target branch. A remote failure for one
//! target is recorded and the loop moves on; nothing already created is
//! rolled back.

use crate::config::WorkflowConfig;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{BranchName, PullRequest, PullRequestSpec, StageOutcomes};
use crate::workflow::progress::ProgressCallback;
use tracing::warn;

/// Result of the creation stage
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// PRs that were created, in target order
    pub created: Vec<PullRequest>,
    /// Per-target outcomes, in target order
    pub outcomes: StageOutcomes,
}

/// Title used for the PR from `head` into `base`
pub fn pr_title(head: &str, base: &str) -> String {
    format!("{head} => {base}")
}

/// `PullRequestSpec` for one target branch
pub fn pr_spec(config: &WorkflowConfig, base: &BranchName) -> PullRequestSpec {
    PullRequestSpec {
        owner: config.owner.clone(),
        repository: config.repo.clone(),
        title: pr_title(&config.head_branch, base),
        head: config.head_branch.clone(),
        base: base.clone(),
    }
}

/// Create one PR per configured target branch (EFFECTFUL)
///
/// Targets are processed sequentially in declaration order. Only
/// per-item remote failures are absorbed; any other error aborts.
pub async fn create_pull_requests(
    platform: &dyn PlatformService,
    config: &WorkflowConfig,
    progress: &dyn ProgressCallback,
) -> Result<CreationReport> {
    let mut report = CreationReport::default();

    for base in &config.target_branches {
        let spec = pr_spec(config, base);
        progress
            .on_message(&format!("📝 Creating PR: {}", spec.title))
            .await;

        match platform.create_pr(&spec).await {
            Ok(pr) => {
                progress
                    .on_message(&format!("✅ Created PR #{}", pr.number))
                    .await;
                report.outcomes.succeed(spec.title);
                report.created.push(pr);
            }
            Err(Error::Remote(e)) => {
                warn!(base = %base, error = %e, "PR creation failed");
                progress
                    .on_message(&format!("❌ Failed: {}", e.detail()))
                    .await;
                report.outcomes.fail(spec.title, e.detail());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
