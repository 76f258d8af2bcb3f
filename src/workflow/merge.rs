//! Batch PR merging
//!
//! Merges the PRs created earlier in the same run, in creation order.
//! Unlike a stacked merge, a failure does not stop the loop: each target
//! branch is independent.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, PullRequest, StageOutcomes};
use crate::workflow::progress::ProgressCallback;
use tracing::warn;

/// Fallback detail when the remote declines a merge without a message
const NOT_MERGED: &str = "not merged";

/// Label used for a PR in the merge stage
pub fn merge_label(pr: &PullRequest) -> String {
    format!("{} (#{})", pr.title, pr.number)
}

/// Merge every record (EFFECTFUL)
///
/// Takes ownership of the records: they come from the creation stage of
/// the same run and are not used afterwards.
pub async fn merge_pull_requests(
    platform: &dyn PlatformService,
    records: Vec<PullRequest>,
    method: MergeMethod,
    progress: &dyn ProgressCallback,
) -> Result<StageOutcomes> {
    let mut outcomes = StageOutcomes::default();

    for pr in records {
        let label = merge_label(&pr);
        progress
            .on_message(&format!("🔀 Merging PR #{}: {}", pr.number, pr.title))
            .await;

        match platform.merge_pr(pr.number, method).await {
            Ok(merge_result) if merge_result.merged => {
                let sha_display = merge_result.sha.as_deref().unwrap_or("(no sha)");
                progress
                    .on_message(&format!("✅ Merged: {sha_display}"))
                    .await;
                outcomes.succeed(label);
            }
            Ok(merge_result) => {
                // Merge API returned but didn't merge
                let detail = merge_result
                    .message
                    .unwrap_or_else(|| NOT_MERGED.to_string());
                warn!(pr_number = pr.number, detail = %detail, "merge declined");
                outcomes.fail(label, detail);
            }
            Err(Error::Remote(e)) => {
                warn!(pr_number = pr.number, error = %e, "merge failed");
                progress
                    .on_message(&format!("❌ Failed: {}", e.detail()))
                    .await;
                outcomes.fail(label, e.detail());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcomes)
}
