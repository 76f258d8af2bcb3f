//! CLI commands

pub mod context;
mod repos;
mod run;
mod serve;
pub mod style;

pub use repos::run_repos;
pub use run::run_workflow;
pub use serve::run_serve;

use anstream::println;
use async_trait::async_trait;
use release_fanout::workflow::ProgressCallback;

/// Prints workflow progress lines to stdout
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("  {message}");
    }
}
