//! HTTP receiver for Slack
//!
//! Routes:
//! - `POST /slack/events` - Events API (URL verification, messages)
//! - `POST /slack/interactions` - modal submissions
//! - `GET /health` - liveness

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::slack::Trigger;
use crate::slack::events::{EventEnvelope, InteractionForm, InteractionPayload};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Header Slack sets on redelivered events
const RETRY_NUM_HEADER: &str = "x-slack-retry-num";

/// Shared state of the receiver
#[derive(Clone)]
pub struct AppState {
    /// Runs actions and delivers replies
    pub dispatcher: Arc<Dispatcher>,
    /// Handle triggers before answering the HTTP request
    pub process_before_response: bool,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidPayload(_) | Self::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .route("/slack/interactions", post(slack_interactions))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(addr: &str, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Config(format!("invalid listen address '{addr}': {e}")))?;

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening for Slack requests");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn slack_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(envelope): Json<EventEnvelope>,
) -> Response {
    // Redelivery of an event already received
    if let Some(retry) = headers.get(RETRY_NUM_HEADER) {
        debug!(retry = ?retry, "dropping redelivered event");
        return StatusCode::OK.into_response();
    }

    match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            debug!("answering URL verification");
            Json(serde_json::json!({ "challenge": challenge })).into_response()
        }
        EventEnvelope::EventCallback { event } => {
            if let Some(trigger) = event.to_trigger() {
                dispatch(&state, trigger).await;
            }
            StatusCode::OK.into_response()
        }
        EventEnvelope::Unknown => StatusCode::OK.into_response(),
    }
}

async fn slack_interactions(
    State(state): State<AppState>,
    Form(form): Form<InteractionForm>,
) -> Result<StatusCode> {
    let payload = InteractionPayload::parse(&form.payload)?;
    if let Some(trigger) = payload.to_trigger()? {
        dispatch(&state, trigger).await;
    }
    // Empty 200 closes the modal
    Ok(StatusCode::OK)
}

/// Hand a trigger to the dispatcher, inline or in the background
///
/// Failures are already logged by the dispatcher; Slack only needs the ack.
async fn dispatch(state: &AppState, trigger: Trigger) {
    if state.process_before_response {
        if let Err(e) = state.dispatcher.handle(trigger).await {
            debug!(error = %e, "trigger failed");
        }
    } else {
        let dispatcher = Arc::clone(&state.dispatcher);
        tokio::spawn(async move {
            if let Err(e) = dispatcher.handle(trigger).await {
                warn!(error = %e, "background trigger failed");
            }
        });
    }
}
