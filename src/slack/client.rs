//! Minimal Slack Web API client

use crate::error::{Error, Result};
use crate::slack::Notifier;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default Slack Web API base URL
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Common envelope of every Web API response
#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
}

/// Slack Web API client authenticated with a bot token
pub struct SlackClient {
    client: Client,
    token: SecretString,
    base_url: String,
}

impl SlackClient {
    /// Create a client against slack.com
    pub fn new(token: SecretString) -> Result<Self> {
        Self::with_base_url(token, SLACK_API_BASE)
    }

    /// Create a client against another base URL (used by tests)
    pub fn with_base_url(token: SecretString, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("release-fanout")
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Slack(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Call a Web API method with a JSON body
    async fn api_call(&self, method: &str, payload: &serde_json::Value) -> Result<()> {
        let url = format!("{}/{method}", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Slack(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(Error::Slack(format!(
                "{method} failed: {}",
                body.error.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn send(&self, destination: &str, text: &str) -> Result<()> {
        debug!(destination, len = text.len(), "posting Slack message");
        self.api_call(
            "chat.postMessage",
            &serde_json::json!({
                "channel": destination,
                "text": text,
            }),
        )
        .await
    }
}
