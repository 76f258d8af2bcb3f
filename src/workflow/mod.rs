//! Release workflow: fan PRs out from the head branch, then merge them
//!
//! Two effectful stages and one pure one:
//! 1. Create - open one PR per target branch (`create`)
//! 2. Merge - merge every PR created in step 1 (`merge`)
//! 3. Report - render outcomes as text (`report`, pure)

mod create;
mod merge;
mod progress;
mod report;

pub use create::{CreationReport, create_pull_requests, pr_spec, pr_title};
pub use merge::{merge_label, merge_pull_requests};
pub use progress::{LogProgress, NoopProgress, ProgressCallback};
pub use report::{CREATE_HEADING, MERGE_HEADING, WorkflowReport};

use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::platform::PlatformService;
use std::sync::Arc;
use tracing::info;

/// Create-then-merge orchestrator
///
/// Holds only immutable state; every call to [`Workflow::run`] allocates
/// its own outcome accumulators.
#[derive(Clone)]
pub struct Workflow {
    platform: Arc<dyn PlatformService>,
    config: WorkflowConfig,
}

impl Workflow {
    /// Create a workflow over `platform` for the given configuration
    pub fn new(platform: Arc<dyn PlatformService>, config: WorkflowConfig) -> Self {
        Self { platform, config }
    }

    /// The configuration this workflow runs with
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Run both stages and collect the report
    ///
    /// Per-item remote failures end up in the report; only unexpected
    /// errors are returned.
    pub async fn run(&self, progress: &dyn ProgressCallback) -> Result<WorkflowReport> {
        info!(
            head = %self.config.head_branch,
            targets = self.config.target_branches.len(),
            "starting release workflow"
        );

        let creation =
            create_pull_requests(self.platform.as_ref(), &self.config, progress).await?;

        let merge = merge_pull_requests(
            self.platform.as_ref(),
            creation.created,
            self.config.merge_method,
            progress,
        )
        .await?;

        let report = WorkflowReport {
            creation: creation.outcomes,
            merge,
        };

        info!(
            created = report.creation.succeeded.len(),
            create_failed = report.creation.failed.len(),
            merged = report.merge.succeeded.len(),
            merge_failed = report.merge.failed.len(),
            "release workflow finished"
        );
        Ok(report)
    }
}
