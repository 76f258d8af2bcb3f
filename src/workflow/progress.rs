//! Progress reporting for batch stages

use async_trait::async_trait;
use tracing::info;

/// Receives a line of progress for every remote call a stage makes
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called before and after each item is processed
    async fn on_message(&self, message: &str);
}

/// Discards progress
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}

/// Forwards progress to the `tracing` subscriber at info level
pub struct LogProgress;

#[async_trait]
impl ProgressCallback for LogProgress {
    async fn on_message(&self, message: &str) {
        info!("{message}");
    }
}
