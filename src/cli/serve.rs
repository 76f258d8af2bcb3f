//! Serve command - run the Slack receiver

use crate::cli::context::CommandContext;
use release_fanout::dispatch::Dispatcher;
use release_fanout::error::Result;
use release_fanout::server::{AppState, serve};
use release_fanout::slack::SlackClient;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Run the HTTP receiver until Ctrl+C / SIGTERM
pub async fn run_serve(config_path: Option<&Path>, listen: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;
    let notifier = SlackClient::new(ctx.config.slack_bot_token()?.clone())?;

    let dispatcher = Dispatcher::new(
        Arc::clone(&ctx.platform),
        ctx.workflow(),
        Arc::new(notifier),
        ctx.config.server.workflow_timeout,
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        process_before_response: ctx.config.server.process_before_response,
    };

    let addr = listen.unwrap_or_else(|| ctx.config.server.listen_addr.clone());
    serve(&addr, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
