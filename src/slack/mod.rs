//! Slack side of the bridge
//!
//! - [`events`]: Events API and interaction payloads, trigger parsing
//! - [`client`]: `chat.postMessage` delivery
//! - [`Notifier`]: the seam the dispatcher delivers text through

pub mod client;
pub mod events;

pub use client::SlackClient;
pub use events::{Action, Trigger};

use crate::error::Result;
use async_trait::async_trait;

/// Delivers text to a Slack user or channel
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post `text` to `destination` (channel id, or user id for a DM)
    async fn send(&self, destination: &str, text: &str) -> Result<()>;
}
