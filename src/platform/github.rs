//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    MergeMethod, MergeResult, PlatformConfig, PullRequest, PullRequestSpec, RepositorySummary,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Page size used when listing repositories
const REPOS_PER_PAGE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(
        token: &SecretString,
        owner: String,
        repo: String,
        host: Option<String>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());

        if let Some(ref h) = host {
            let base_url = if h.starts_with("http://") || h.starts_with("https://") {
                h.clone()
            } else {
                format!("https://{h}/api/v3")
            };
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig { owner, repo, host },
        })
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>> {
        debug!("listing repositories for authenticated user");
        let first_page = self
            .client
            .current()
            .list_repos_for_authenticated_user()
            .per_page(REPOS_PER_PAGE)
            .send()
            .await?;

        let repos = self.client.all_pages(first_page).await?;

        let result: Vec<RepositorySummary> = repos
            .into_iter()
            .filter_map(|r| r.full_name)
            .map(|full_name| RepositorySummary { full_name })
            .collect();
        debug!(count = result.len(), "listed repositories");
        Ok(result)
    }

    async fn create_pr(&self, spec: &PullRequestSpec) -> Result<PullRequest> {
        debug!(head = %spec.head, base = %spec.base, "creating PR");
        let pr = self
            .client
            .pulls(&spec.owner, &spec.repository)
            .create(&spec.title, &spec.head, &spec.base)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
