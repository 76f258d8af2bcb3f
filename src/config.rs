//! Configuration loading
//!
//! Static settings come from an optional TOML file and can be overridden
//! by environment variables. Tokens are read from the environment only.
//!
//! ```toml
//! [github]
//! owner = "acme"
//! repo = "app"
//!
//! [workflow]
//! head_branch = "develop"
//! target_branches = ["master/jp", "master/us"]
//! merge_method = "merge"
//!
//! [server]
//! listen_addr = "0.0.0.0:3000"
//! process_before_response = true
//! workflow_timeout_secs = 300
//! ```

use crate::error::{Error, Result};
use crate::types::{BranchName, MergeMethod};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory name under the user config dir
const CONFIG_DIR: &str = "release-fanout";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Env var holding the GitHub token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";
/// Env var holding the Slack bot token
pub const ENV_SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";

const ENV_OWNER: &str = "FANOUT_OWNER";
const ENV_REPO: &str = "FANOUT_REPO";
const ENV_HEAD_BRANCH: &str = "FANOUT_HEAD_BRANCH";
const ENV_TARGET_BRANCHES: &str = "FANOUT_TARGET_BRANCHES";
const ENV_MERGE_METHOD: &str = "FANOUT_MERGE_METHOD";
const ENV_PORT: &str = "PORT";

const DEFAULT_HEAD_BRANCH: &str = "develop";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WORKFLOW_TIMEOUT_SECS: u64 = 300;

/// What the release workflow operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch every PR is opened from
    pub head_branch: BranchName,
    /// Release branches, in processing order
    pub target_branches: Vec<BranchName>,
    /// How created PRs are merged
    pub merge_method: MergeMethod,
}

impl WorkflowConfig {
    /// Config with the default head branch and merge method
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        targets: Vec<BranchName>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            head_branch: DEFAULT_HEAD_BRANCH.to_string(),
            target_branches: targets,
            merge_method: MergeMethod::default(),
        }
    }

    /// Reject configurations the workflow cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::Config("repository owner is not set".to_string()));
        }
        if self.repo.trim().is_empty() {
            return Err(Error::Config("repository name is not set".to_string()));
        }
        if self.head_branch.trim().is_empty() {
            return Err(Error::Config("head branch is empty".to_string()));
        }
        if self.target_branches.is_empty() {
            return Err(Error::Config("no target branches configured".to_string()));
        }
        if self.target_branches.iter().any(|b| b.trim().is_empty()) {
            return Err(Error::Config("target branch list contains an empty name".to_string()));
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub listen_addr: String,
    /// Run the action before answering Slack (required on FaaS hosts)
    pub process_before_response: bool,
    /// Wall-clock budget for one workflow run
    pub workflow_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            process_before_response: true,
            workflow_timeout: Duration::from_secs(DEFAULT_WORKFLOW_TIMEOUT_SECS),
        }
    }
}

/// Full application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// GitHub Enterprise host (None for github.com)
    pub github_host: Option<String>,
    /// Workflow settings
    pub workflow: WorkflowConfig,
    /// Server settings
    pub server: ServerConfig,
    github_token: Option<SecretString>,
    slack_bot_token: Option<SecretString>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("github_host", &self.github_host)
            .field("workflow", &self.workflow)
            .field("server", &self.server)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "slack_bot_token",
                &self.slack_bot_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    github: GitHubSection,
    workflow: WorkflowSection,
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GitHubSection {
    owner: Option<String>,
    repo: Option<String>,
    host: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WorkflowSection {
    head_branch: Option<String>,
    target_branches: Option<Vec<String>>,
    merge_method: Option<MergeMethod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
    listen_addr: Option<String>,
    process_before_response: Option<bool>,
    workflow_timeout_secs: Option<u64>,
}

/// Default config file location, if a config dir exists on this platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl AppConfig {
    /// Load from `path` (or the default location) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_contents = match path {
            Some(p) => Some(read_config_file(p)?),
            None => match default_config_path() {
                Some(p) if p.exists() => Some(read_config_file(&p)?),
                _ => None,
            },
        };

        Self::from_sources(file_contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from TOML text and an environment lookup
    ///
    /// Environment values take precedence over the file.
    pub fn from_sources<F>(toml_text: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = match toml_text {
            Some(text) => toml::from_str(text)?,
            None => FileConfig::default(),
        };

        let env_nonempty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let owner = env_nonempty(ENV_OWNER).or(file.github.owner).unwrap_or_default();
        let repo = env_nonempty(ENV_REPO).or(file.github.repo).unwrap_or_default();

        let head_branch = env_nonempty(ENV_HEAD_BRANCH)
            .or(file.workflow.head_branch)
            .unwrap_or_else(|| DEFAULT_HEAD_BRANCH.to_string());

        let target_branches = env_nonempty(ENV_TARGET_BRANCHES)
            .map(|v| parse_branch_list(&v))
            .or(file.workflow.target_branches)
            .unwrap_or_default();

        let merge_method = match env_nonempty(ENV_MERGE_METHOD) {
            Some(v) => v.parse::<MergeMethod>().map_err(Error::Config)?,
            None => file.workflow.merge_method.unwrap_or_default(),
        };

        let listen_addr = match env_nonempty(ENV_PORT) {
            Some(port) => {
                let port: u16 = port
                    .trim()
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid {ENV_PORT} value '{port}'")))?;
                format!("0.0.0.0:{port}")
            }
            None => file
                .server
                .listen_addr
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        };

        let timeout_secs = file
            .server
            .workflow_timeout_secs
            .unwrap_or(DEFAULT_WORKFLOW_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "workflow_timeout_secs must be greater than zero".to_string(),
            ));
        }

        let config = Self {
            github_host: file.github.host,
            workflow: WorkflowConfig {
                owner,
                repo,
                head_branch,
                target_branches,
                merge_method,
            },
            server: ServerConfig {
                listen_addr,
                process_before_response: file.server.process_before_response.unwrap_or(true),
                workflow_timeout: Duration::from_secs(timeout_secs),
            },
            github_token: env_nonempty(ENV_GITHUB_TOKEN).map(|t| SecretString::new(t.into())),
            slack_bot_token: env_nonempty(ENV_SLACK_BOT_TOKEN)
                .map(|t| SecretString::new(t.into())),
        };

        config.workflow.validate()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// GitHub token; required for every command
    pub fn github_token(&self) -> Result<&SecretString> {
        self.github_token
            .as_ref()
            .ok_or_else(|| Error::Config(format!("{ENV_GITHUB_TOKEN} not set")))
    }

    /// Slack bot token; required to serve Slack requests
    pub fn slack_bot_token(&self) -> Result<&SecretString> {
        self.slack_bot_token
            .as_ref()
            .ok_or_else(|| Error::Config(format!("{ENV_SLACK_BOT_TOKEN} not set")))
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))
}

/// Split a comma-separated branch list, dropping surrounding whitespace
pub fn parse_branch_list(value: &str) -> Vec<BranchName> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
