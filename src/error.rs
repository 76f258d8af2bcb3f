//! Error types for release-fanout

use std::time::Duration;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by release-fanout
#[derive(Debug, Error)]
pub enum Error {
    /// A single remote call failed (create or merge of one PR, or listing)
    ///
    /// Batch stages record these per item instead of aborting.
    #[error("{0}")]
    Remote(RemoteApiError),

    /// Unexpected GitHub-side failure (client setup, malformed response)
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Slack Web API rejected a request
    #[error("Slack API error: {0}")]
    Slack(String),

    /// Incoming Slack payload could not be understood
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The workflow exceeded its wall-clock budget
    #[error("workflow timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

/// One structured error entry returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSubError {
    /// Human-readable message
    pub message: String,
}

/// Failure of one remote repository call
///
/// GitHub validation failures carry an `errors` array; transport failures
/// and plain API errors do not. [`RemoteApiError::sub_errors`] hides that
/// difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteApiError {
    /// Top-level message
    pub message: String,
    /// HTTP status, when the remote answered
    pub status: Option<u16>,
    /// Structured sub-errors (may be empty)
    pub errors: Vec<RemoteSubError>,
}

impl RemoteApiError {
    /// Error with only a message (no status, no sub-errors)
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            errors: Vec::new(),
        }
    }

    /// Build from the raw pieces of a GitHub error response
    ///
    /// Each entry of `errors` contributes its `message` field; entries
    /// without one fall back to their `code`, then to their JSON text.
    pub fn from_parts(
        message: impl Into<String>,
        status: Option<u16>,
        errors: &[serde_json::Value],
    ) -> Self {
        let errors = errors
            .iter()
            .map(|entry| {
                let message = entry
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .or_else(|| entry.get("code").and_then(serde_json::Value::as_str))
                    .map_or_else(|| entry.to_string(), ToString::to_string);
                RemoteSubError { message }
            })
            .collect();

        Self {
            message: message.into(),
            status,
            errors,
        }
    }

    /// Sub-errors, or one synthetic entry wrapping the top-level message
    pub fn sub_errors(&self) -> Vec<RemoteSubError> {
        if self.errors.is_empty() {
            vec![RemoteSubError {
                message: self.message.clone(),
            }]
        } else {
            self.errors.clone()
        }
    }

    /// Sub-error messages joined for display in a report
    pub fn detail(&self) -> String {
        self.sub_errors()
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for RemoteApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "remote error ({status}): {}", self.detail()),
            None => write!(f, "remote error: {}", self.detail()),
        }
    }
}

impl From<RemoteApiError> for Error {
    fn from(err: RemoteApiError) -> Self {
        Self::Remote(err)
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::Remote(RemoteApiError::from_parts(
                source.message.clone(),
                Some(source.status_code.as_u16()),
                source.errors.as_deref().unwrap_or_default(),
            )),
            // Response arrived but did not have the expected shape
            octocrab::Error::Serde { source, .. } => {
                Self::GitHubApi(format!("unexpected response: {source}"))
            }
            octocrab::Error::Json { source, .. } => {
                Self::GitHubApi(format!("unexpected response: {source}"))
            }
            other => Self::Remote(RemoteApiError::from_message(other.to_string())),
        }
    }
}
