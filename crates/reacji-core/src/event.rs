use serde::{Deserialize, Serialize};

/// A platform event after it has been decoded from the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Someone added a reaction to an item.
    ReactionAdded(ReactionEvent),
    /// A plain message was posted in a channel the bot can see.
    Message(MessageEvent),
    /// A global or message shortcut was invoked.
    Shortcut(ShortcutEvent),
    /// A modal view was submitted.
    ViewSubmission(ViewSubmission),
}

/// A `reaction_added` event.
///
/// Channel and timestamp are optional on purpose: the platform sends
/// reactions on files and other items without them, and those are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Kind of item reacted to (`"message"`, `"file"`, ...).
    pub item_type: String,
    pub channel_id: Option<String>,
    pub message_ts: Option<String>,
    /// Emoji name without colons (e.g. `"flag-jp"`).
    pub reaction: String,
    /// User who reacted.
    #[serde(default)]
    pub user: Option<String>,
}

impl ReactionEvent {
    /// Channel and timestamp of the reacted message, if this event targets one.
    pub fn message_target(&self) -> Option<(&str, &str)> {
        if self.item_type != "message" {
            return None;
        }
        match (self.channel_id.as_deref(), self.message_ts.as_deref()) {
            (Some(channel), Some(ts)) if !channel.is_empty() && !ts.is_empty() => {
                Some((channel, ts))
            }
            _ => None,
        }
    }
}

/// One message inside a thread, root included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub ts: String,
    /// Set on replies and on roots that already have replies.
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
}

impl ThreadMessage {
    /// Timestamp a threaded reply to this message must carry.
    pub fn reply_thread_ts(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }
}

/// A plain channel message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEvent {
    pub channel: String,
    pub text: String,
    pub ts: String,
    pub user: Option<String>,
    /// Present when a bot (including this one) posted the message.
    pub bot_id: Option<String>,
    /// Message subtype (`"message_changed"`, `"bot_message"`, ...).
    pub subtype: Option<String>,
}

impl MessageEvent {
    /// Whether the message came from a human and is a regular post.
    pub fn is_from_user(&self) -> bool {
        self.bot_id.is_none() && self.subtype.is_none()
    }
}

/// An invoked shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEvent {
    pub callback_id: String,
    /// Short-lived id required to open a modal in response.
    pub trigger_id: String,
    pub user: Option<String>,
}

/// A submitted modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSubmission {
    pub callback_id: String,
    pub view_id: String,
    /// Opaque string the view was built with.
    pub private_metadata: String,
    /// Raw `view.state.values` object, keyed by block id then action id.
    pub state: serde_json::Value,
    pub user: Option<String>,
}

impl ViewSubmission {
    /// Value of a plain-text input element.
    pub fn input_value(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.state
            .get(block_id)?
            .get(action_id)?
            .get("value")?
            .as_str()
    }

    /// Value of the selected option of a select element.
    pub fn selected_value(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.state
            .get(block_id)?
            .get(action_id)?
            .get("selected_option")?
            .get("value")?
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reaction(item_type: &str, channel: Option<&str>, ts: Option<&str>) -> ReactionEvent {
        ReactionEvent {
            item_type: item_type.to_string(),
            channel_id: channel.map(String::from),
            message_ts: ts.map(String::from),
            reaction: "flag-jp".to_string(),
            user: None,
        }
    }

    #[test]
    fn test_message_target_valid() {
        let ev = reaction("message", Some("C1"), Some("1700000000.000100"));
        assert_eq!(ev.message_target(), Some(("C1", "1700000000.000100")));
    }

    #[test]
    fn test_message_target_rejects_non_message_items() {
        assert!(reaction("file", Some("C1"), Some("1.0"))
            .message_target()
            .is_none());
    }

    #[test]
    fn test_message_target_rejects_missing_fields() {
        assert!(reaction("message", None, Some("1.0"))
            .message_target()
            .is_none());
        assert!(reaction("message", Some("C1"), None)
            .message_target()
            .is_none());
        assert!(reaction("message", Some(""), Some("1.0"))
            .message_target()
            .is_none());
    }

    #[test]
    fn test_reply_thread_ts_prefers_thread_root() {
        let root = ThreadMessage {
            ts: "2.0".into(),
            thread_ts: Some("1.0".into()),
            ..Default::default()
        };
        assert_eq!(root.reply_thread_ts(), "1.0");

        let standalone = ThreadMessage {
            ts: "3.0".into(),
            ..Default::default()
        };
        assert_eq!(standalone.reply_thread_ts(), "3.0");
    }

    #[test]
    fn test_view_submission_values() {
        let sub = ViewSubmission {
            callback_id: "run-translation".into(),
            view_id: "V1".into(),
            private_metadata: String::new(),
            state: json!({
                "text": {"a": {"type": "plain_text_input", "value": "Hi"}},
                "lang": {"a": {"type": "static_select", "selected_option": {"value": "es"}}}
            }),
            user: None,
        };
        assert_eq!(sub.input_value("text", "a"), Some("Hi"));
        assert_eq!(sub.selected_value("lang", "a"), Some("es"));
        assert_eq!(sub.input_value("missing", "a"), None);
        assert_eq!(sub.selected_value("text", "a"), None);
    }

    #[test]
    fn test_message_from_bot_is_not_user() {
        let msg = MessageEvent {
            bot_id: Some("B1".into()),
            ..Default::default()
        };
        assert!(!msg.is_from_user());
        assert!(MessageEvent::default().is_from_user());
    }
}
