//! Decoding of inbound Events API and interactivity requests.

use super::types::{EventEnvelope, InteractionPayload, SlackEvent};
use reacji_core::{
    error::ReacjiError,
    event::{ChatEvent, MessageEvent, ReactionEvent, ShortcutEvent, ViewSubmission},
};
use tracing::debug;

/// What an inbound request turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Endpoint ownership check; answer with the challenge.
    UrlVerification { challenge: String },
    /// A platform event for the gateway.
    Event(ChatEvent),
    /// Well-formed but nothing the bot handles.
    Ignored,
}

/// Decode an Events API JSON body.
pub fn decode_event_body(body: &[u8]) -> Result<Inbound, ReacjiError> {
    let envelope: EventEnvelope = serde_json::from_slice(body)?;
    let event = match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            return Ok(Inbound::UrlVerification { challenge })
        }
        EventEnvelope::EventCallback { event } => event,
        EventEnvelope::Other => return Ok(Inbound::Ignored),
    };

    let decoded = match event {
        SlackEvent::ReactionAdded(p) => ChatEvent::ReactionAdded(ReactionEvent {
            item_type: p.item.item_type,
            channel_id: p.item.channel,
            message_ts: p.item.ts,
            reaction: p.reaction,
            user: p.user,
        }),
        SlackEvent::Message(p) => {
            let (Some(channel), Some(ts)) = (p.channel, p.ts) else {
                debug!("slack: message event without channel or ts");
                return Ok(Inbound::Ignored);
            };
            ChatEvent::Message(MessageEvent {
                channel,
                text: p.text.unwrap_or_default(),
                ts,
                user: p.user,
                bot_id: p.bot_id,
                subtype: p.subtype,
            })
        }
        SlackEvent::Other => return Ok(Inbound::Ignored),
    };
    Ok(Inbound::Event(decoded))
}

/// Decode an interactivity request: a form body whose `payload` field holds JSON.
pub fn decode_interaction_body(body: &[u8]) -> Result<Inbound, ReacjiError> {
    let payload = form_field(body, "payload")
        .ok_or_else(|| ReacjiError::Platform("interaction body has no payload field".into()))?;
    decode_interaction_payload(&payload)
}

/// Decode the JSON inside an interactivity `payload` field.
pub fn decode_interaction_payload(payload: &str) -> Result<Inbound, ReacjiError> {
    let parsed: InteractionPayload = serde_json::from_str(payload)?;
    let event = match parsed {
        InteractionPayload::Shortcut {
            callback_id,
            trigger_id,
            user,
        }
        | InteractionPayload::MessageAction {
            callback_id,
            trigger_id,
            user,
        } => ChatEvent::Shortcut(ShortcutEvent {
            callback_id,
            trigger_id,
            user: user.map(|u| u.id),
        }),
        InteractionPayload::ViewSubmission { view, user } => {
            ChatEvent::ViewSubmission(ViewSubmission {
                callback_id: view.callback_id,
                view_id: view.id,
                private_metadata: view.private_metadata,
                state: view.state.map(|s| s.values).unwrap_or_default(),
                user: user.map(|u| u.id),
            })
        }
        InteractionPayload::Other => return Ok(Inbound::Ignored),
    };
    Ok(Inbound::Event(event))
}

/// Find and percent-decode one field of an `application/x-www-form-urlencoded` body.
pub(crate) fn form_field(body: &[u8], name: &str) -> Option<String> {
    let body = std::str::from_utf8(body).ok()?;
    body.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name {
            return None;
        }
        urlencoding::decode(&value.replace('+', " "))
            .ok()
            .map(|v| v.into_owned())
    })
}
