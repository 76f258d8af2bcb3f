//! Run command - execute the release workflow once from the terminal

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize};
use anstream::println;
use release_fanout::error::Result;
use std::path::Path;

/// Run the release workflow and print its report
pub async fn run_workflow(config_path: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;
    let workflow = ctx.workflow();
    let config = workflow.config();

    println!(
        "{} {} into {} branch(es) of {}",
        "Releasing".emphasis(),
        config.head_branch.accent(),
        config.target_branches.len().accent(),
        format!("{}/{}", config.owner, config.repo).accent()
    );

    let report = workflow.run(&CliProgress).await?;

    println!();
    println!("{report}");
    println!();

    if report.has_failures() {
        println!("{}", "⚠️  Release finished with failures".warn());
    } else {
        println!("{}", format!("{CHECK} Release complete").success());
    }
    Ok(())
}
