//! Repos command - list repositories of the authenticated user

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use release_fanout::dispatch::list_repositories_text;
use release_fanout::error::Result;
use std::path::Path;
use std::time::Duration;

/// Run the repos command
pub async fn run_repos(config_path: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Fetching repositories...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let text = match list_repositories_text(ctx.platform.as_ref()).await {
        Ok(text) => text,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!("{} Fetched repositories", check()));

    if text.is_empty() {
        println!("{}", "No repositories found.".muted());
    } else {
        println!("{text}");
    }
    Ok(())
}
