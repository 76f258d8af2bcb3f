//! Trigger dispatch
//!
//! Runs the action a [`Trigger`] asks for and delivers the resulting text
//! through a [`Notifier`].

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::slack::{Action, Notifier, Trigger};
use crate::workflow::{LogProgress, Workflow};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Sent instead of an empty listing; Slack rejects empty messages
pub const EMPTY_LISTING_PLACEHOLDER: &str = "(no repositories)";

/// One `full_name` per line; no repositories gives an empty string
pub async fn list_repositories_text(platform: &dyn PlatformService) -> Result<String> {
    let repos = platform.list_repositories().await?;
    Ok(repos
        .into_iter()
        .map(|r| r.full_name)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Greeting for `user`
pub fn greeting(user: &str) -> String {
    format!("Hey there <@{user}>!")
}

/// Routes triggers to actions and replies
pub struct Dispatcher {
    platform: Arc<dyn PlatformService>,
    workflow: Workflow,
    notifier: Arc<dyn Notifier>,
    workflow_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(
        platform: Arc<dyn PlatformService>,
        workflow: Workflow,
        notifier: Arc<dyn Notifier>,
        workflow_timeout: Duration,
    ) -> Self {
        Self {
            platform,
            workflow,
            notifier,
            workflow_timeout,
        }
    }

    /// Produce the reply text for `action`
    ///
    /// The workflow run is abandoned once the timeout elapses; whatever it
    /// had accumulated is dropped.
    pub async fn run_action(&self, action: Action, requester: &str) -> Result<String> {
        match action {
            Action::Greet => Ok(greeting(requester)),
            Action::ListRepositories => list_repositories_text(self.platform.as_ref()).await,
            Action::CreateAndMergePrs => {
                let run = self.workflow.run(&LogProgress);
                let report = tokio::time::timeout(self.workflow_timeout, run)
                    .await
                    .map_err(|_| Error::Timeout(self.workflow_timeout))??;
                Ok(report.render())
            }
        }
    }

    /// Run the trigger's action and deliver the text to the requester
    ///
    /// On failure nothing is delivered; the error is logged and returned.
    pub async fn handle(&self, trigger: Trigger) -> Result<()> {
        info!(
            action = %trigger.action,
            requester = %trigger.requester,
            "handling trigger"
        );

        let text = match self.run_action(trigger.action, &trigger.requester).await {
            Ok(text) => text,
            Err(e) => {
                error!(action = %trigger.action, error = %e, "action failed, no reply sent");
                return Err(e);
            }
        };

        let text = if text.is_empty() {
            EMPTY_LISTING_PLACEHOLDER.to_string()
        } else {
            text
        };

        if let Err(e) = self.notifier.send(trigger.destination(), &text).await {
            error!(destination = trigger.destination(), error = %e, "failed to deliver reply");
            return Err(e);
        }
        Ok(())
    }
}
