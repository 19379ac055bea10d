//! Slack Web API and inbound payload deserialization types.

use reacji_core::event::ThreadMessage;
use serde::Deserialize;

/// Envelope shared by every Web API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepliesResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub messages: Vec<ThreadMessage>,
    #[serde(default)]
    pub has_more: bool,
    pub response_metadata: Option<ResponseMetadata>,
}

impl RepliesResponse {
    /// Cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }
        self.response_metadata
            .as_ref()
            .map(|m| m.next_cursor.as_str())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Events API request body.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum EventEnvelope {
    UrlVerification { challenge: String },
    EventCallback { event: SlackEvent },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum SlackEvent {
    ReactionAdded(ReactionAddedPayload),
    Message(MessagePayload),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionAddedPayload {
    pub reaction: String,
    pub user: Option<String>,
    pub item: ReactionItem,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub channel: Option<String>,
    pub ts: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagePayload {
    pub channel: Option<String>,
    pub text: Option<String>,
    pub ts: Option<String>,
    pub user: Option<String>,
    pub bot_id: Option<String>,
    pub subtype: Option<String>,
}

/// Interactivity payload (the JSON inside the form-encoded `payload` field).
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum InteractionPayload {
    Shortcut {
        callback_id: String,
        trigger_id: String,
        user: Option<SlackUser>,
    },
    MessageAction {
        callback_id: String,
        trigger_id: String,
        user: Option<SlackUser>,
    },
    ViewSubmission {
        view: SlackView,
        user: Option<SlackUser>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlackUser {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlackView {
    pub id: String,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub private_metadata: String,
    pub state: Option<ViewState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewState {
    #[serde(default)]
    pub values: serde_json::Value,
}
