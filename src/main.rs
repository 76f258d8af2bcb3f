//! fanout - Slack-triggered release PR fan-out

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Open and merge release PRs from Slack or the terminal
#[derive(Parser)]
#[command(name = "fanout")]
#[command(about = "Open PRs from develop into every release branch and merge them")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve Slack events and interactions over HTTP
    Serve {
        /// Listen address (overrides config and PORT)
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Run the release workflow once and print the report
    Run,
    /// List repositories of the authenticated GitHub user
    Repos,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Serve { listen } => cli::run_serve(config, listen)
            .await
            .context("server failed")?,
        Commands::Run => cli::run_workflow(config)
            .await
            .context("release workflow failed")?,
        Commands::Repos => cli::run_repos(config)
            .await
            .context("failed to list repositories")?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.json_logs);

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        anstream::eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
