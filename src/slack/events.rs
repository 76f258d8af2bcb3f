//! Slack payloads and trigger parsing
//!
//! Two entry points produce a [`Trigger`]:
//! - a message (or @mention) whose text matches one of the command patterns
//! - a modal `view_submission` carrying the selected action

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// `callback_id` of the modal that starts an action
pub const WORKFLOW_CALLBACK_ID: &str = "release_fanout";
/// Block holding the action selector in the modal
pub const ACTION_BLOCK_ID: &str = "action_block";
/// Select element inside [`ACTION_BLOCK_ID`]
pub const ACTION_SELECT_ID: &str = "action_select";

// Optional leading bot mention, then the command, nothing else
static WORKFLOW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(?:<@[^>]+>\s*)?",
        r"(?:release|create[ _-]?prs?[ _-]develop[ _-]into[ _-]masters)\s*$",
    ))
    .expect("workflow pattern is valid")
});
static REPOS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:<@[^>]+>\s*)?(?:my[ _-]?repos|list[ _-]repos)\s*$")
        .expect("repos pattern is valid")
});
// Matched as a plain, case-sensitive substring
const GREET_KEYWORD: &str = "hello";

/// What a trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reply with a greeting
    Greet,
    /// List repositories of the authenticated GitHub user
    ListRepositories,
    /// Run the create-then-merge workflow
    CreateAndMergePrs,
}

impl Action {
    /// Match message text against the command patterns
    pub fn from_message_text(text: &str) -> Option<Self> {
        if WORKFLOW_PATTERN.is_match(text) {
            Some(Self::CreateAndMergePrs)
        } else if REPOS_PATTERN.is_match(text) {
            Some(Self::ListRepositories)
        } else if text.contains(GREET_KEYWORD) {
            Some(Self::Greet)
        } else {
            None
        }
    }

    /// Parse the option value submitted from the modal
    pub fn from_option_value(value: &str) -> Option<Self> {
        match value {
            "list_repositories" => Some(Self::ListRepositories),
            "create_and_merge_prs" => Some(Self::CreateAndMergePrs),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greet => write!(f, "greet"),
            Self::ListRepositories => write!(f, "list-repositories"),
            Self::CreateAndMergePrs => write!(f, "create-and-merge-prs"),
        }
    }
}

/// A resolved request from a Slack user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Slack user id of the requester
    pub requester: String,
    /// Channel the request came from, if any
    pub channel: Option<String>,
    /// Requested action
    pub action: Action,
}

impl Trigger {
    /// Where the reply goes: the channel when known, else the user (DM)
    pub fn destination(&self) -> &str {
        self.channel.as_deref().unwrap_or(&self.requester)
    }
}

/// Top-level body posted to the Events API endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// Endpoint ownership check
    UrlVerification {
        /// Value to echo back
        challenge: String,
    },
    /// A subscribed event
    EventCallback {
        /// The event itself
        event: SlackEvent,
    },
    /// Anything else (app rate limits, etc.)
    #[serde(other)]
    Unknown,
}

/// Events this bridge listens to
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEvent {
    /// Message in a channel or DM the bot is in
    Message(MessageEvent),
    /// @mention of the bot
    AppMention(MessageEvent),
    /// Unknown event type (for forward compatibility)
    #[serde(other)]
    Unknown,
}

/// Payload shared by `message` and `app_mention` events
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageEvent {
    /// User who sent the message
    #[serde(default)]
    pub user: Option<String>,
    /// Text of the message
    #[serde(default)]
    pub text: String,
    /// Channel where the message was sent
    #[serde(default)]
    pub channel: Option<String>,
    /// Subtype of message (e.g., "bot_message", "message_changed")
    #[serde(default)]
    pub subtype: Option<String>,
    /// Bot ID (if message is from a bot)
    #[serde(default)]
    pub bot_id: Option<String>,
}

impl MessageEvent {
    /// Check if this is a bot message (should be ignored)
    pub fn is_bot_message(&self) -> bool {
        self.bot_id.is_some() || self.subtype.as_deref() == Some("bot_message")
    }

    /// Turn the message into a trigger when it is a plain user message
    /// matching a command pattern
    pub fn to_trigger(&self) -> Option<Trigger> {
        // Edits, deletions, joins and bot posts never trigger anything
        if self.is_bot_message() || self.subtype.is_some() {
            return None;
        }
        let requester = self.user.clone()?;
        let action = Action::from_message_text(&self.text)?;
        Some(Trigger {
            requester,
            channel: self.channel.clone(),
            action,
        })
    }
}

impl MessageEvent {
    /// Whether the text opens with a user mention (`<@U123> ...`)
    fn starts_with_mention(&self) -> bool {
        self.text.trim_start().starts_with("<@")
    }
}

impl SlackEvent {
    /// Trigger carried by this event, if any
    ///
    /// A channel post that mentions the bot arrives both as `message` and
    /// as `app_mention`; only the `app_mention` copy triggers.
    pub fn to_trigger(&self) -> Option<Trigger> {
        match self {
            Self::Message(event) if event.starts_with_mention() => None,
            Self::Message(event) | Self::AppMention(event) => event.to_trigger(),
            Self::Unknown => None,
        }
    }
}

/// Form field wrapper of interaction requests (`payload=<json>`)
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionForm {
    /// JSON-encoded [`InteractionPayload`]
    pub payload: String,
}

/// Interaction payloads this bridge handles
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionPayload {
    /// A modal was submitted
    ViewSubmission {
        /// Submitting user
        user: SlackUser,
        /// Submitted view
        view: View,
    },
    /// Other interaction types (block actions, shortcuts, ...)
    #[serde(other)]
    Unknown,
}

/// User reference inside interaction payloads
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    /// Slack user id
    pub id: String,
}

/// Submitted modal view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct View {
    /// Identifies which modal was submitted
    #[serde(default)]
    pub callback_id: String,
    /// Input values
    #[serde(default)]
    pub state: ViewState,
}

/// Input state of a submitted view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewState {
    /// `block_id -> action_id -> element state`
    #[serde(default)]
    pub values: serde_json::Value,
}

impl InteractionPayload {
    /// Parse the JSON carried in the `payload` form field
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| Error::InvalidPayload(format!("interaction payload: {e}")))
    }

    /// Trigger carried by this interaction
    ///
    /// `Ok(None)` for interactions this bridge does not own; an error when
    /// the workflow modal was submitted without a usable selection.
    pub fn to_trigger(&self) -> Result<Option<Trigger>> {
        let Self::ViewSubmission { user, view } = self else {
            return Ok(None);
        };
        if view.callback_id != WORKFLOW_CALLBACK_ID {
            return Ok(None);
        }

        let pointer = format!("/{ACTION_BLOCK_ID}/{ACTION_SELECT_ID}/selected_option/value");
        let value = view
            .state
            .values
            .pointer(&pointer)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::InvalidPayload("no action selected".to_string()))?;

        let action = Action::from_option_value(value)
            .ok_or_else(|| Error::InvalidPayload(format!("unknown action '{value}'")))?;

        Ok(Some(Trigger {
            requester: user.id.clone(),
            channel: None,
            action,
        }))
    }
}
