//! Shared command context for CLI commands
//!
//! Extracts common setup shared by serve, run, and repos.

use release_fanout::config::AppConfig;
use release_fanout::error::Result;
use release_fanout::platform::{GitHubService, PlatformService};
use release_fanout::workflow::Workflow;
use std::path::Path;
use std::sync::Arc;

/// Shared context for CLI commands that interact with GitHub
pub struct CommandContext {
    /// Loaded configuration
    pub config: AppConfig,
    /// Platform service (GitHub)
    pub platform: Arc<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Loads configuration, then builds the GitHub service from it.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path)?;

        let platform = GitHubService::new(
            config.github_token()?,
            config.workflow.owner.clone(),
            config.workflow.repo.clone(),
            config.github_host.clone(),
        )?;

        Ok(Self {
            config,
            platform: Arc::new(platform),
        })
    }

    /// Workflow bound to this context's platform and configuration
    pub fn workflow(&self) -> Workflow {
        Workflow::new(Arc::clone(&self.platform), self.config.workflow.clone())
    }
}
