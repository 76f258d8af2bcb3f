//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MergePrCall, MockPlatformService};

use async_trait::async_trait;
use release_fanout::config::WorkflowConfig;
use release_fanout::error::{Error, RemoteApiError, Result};
use release_fanout::slack::Notifier;
use release_fanout::types::PlatformConfig;
use serde_json::json;
use std::sync::Mutex;

/// GitHub config for `acme/app`
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "app".to_string(),
        host: None,
    }
}

/// Workflow config for `acme/app` from `develop` into `targets`
pub fn workflow_config(targets: &[&str]) -> WorkflowConfig {
    WorkflowConfig::new(
        "acme",
        "app",
        targets.iter().map(|t| (*t).to_string()).collect(),
    )
}

/// Remote error with one structured sub-error, as GitHub sends on 422/405
pub fn remote_error(status: u16, sub_message: &str) -> RemoteApiError {
    RemoteApiError::from_parts(
        "Validation Failed",
        Some(status),
        &[json!({ "resource": "PullRequest", "code": "custom", "message": sub_message })],
    )
}

/// Message delivered through [`MockNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub text: String,
}

/// Records every message instead of posting it
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<SentMessage>>,
    fail_with: Mutex<Option<String>>,
}

impl MockNotifier {
    /// All delivered messages, in order
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Make every `send` fail
    pub fn fail_sends(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, destination: &str, text: &str) -> Result<()> {
        if let Some(msg) = self.fail_with.lock().unwrap().as_ref() {
            return Err(Error::Slack(msg.clone()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            destination: destination.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
