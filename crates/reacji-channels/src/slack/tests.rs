//! Tests for the Slack channel module.

use super::events::*;
use super::signature::*;
use super::types::*;
use super::api::{follow_cursor, MAX_REPLY_PAGES};
use super::SlackChannel;
use reacji_core::{config::SlackConfig, event::ChatEvent, traits::ChatPlatform};

#[test]
fn test_url_verification() {
    let body = br#"{"token":"t","challenge":"3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P","type":"url_verification"}"#;
    assert_eq!(
        decode_event_body(body).unwrap(),
        Inbound::UrlVerification {
            challenge: "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P".into()
        }
    );
}

#[test]
fn test_reaction_added_event() {
    let body = br#"{
        "type": "event_callback",
        "team_id": "T1",
        "event": {
            "type": "reaction_added",
            "user": "U1",
            "reaction": "flag-jp",
            "item_user": "U2",
            "item": {"type": "message", "channel": "C1", "ts": "1700000000.000100"},
            "event_ts": "1700000001.000200"
        }
    }"#;
    let Inbound::Event(ChatEvent::ReactionAdded(ev)) = decode_event_body(body).unwrap() else {
        panic!("expected reaction event");
    };
    assert_eq!(ev.reaction, "flag-jp");
    assert_eq!(ev.user.as_deref(), Some("U1"));
    assert_eq!(ev.message_target(), Some(("C1", "1700000000.000100")));
}

#[test]
fn test_reaction_on_file_has_no_target() {
    let body = br#"{
        "type": "event_callback",
        "event": {
            "type": "reaction_added",
            "reaction": "flag-fr",
            "item": {"type": "file", "file": "F1"}
        }
    }"#;
    let Inbound::Event(ChatEvent::ReactionAdded(ev)) = decode_event_body(body).unwrap() else {
        panic!("expected reaction event");
    };
    assert!(ev.message_target().is_none());
}

#[test]
fn test_message_event() {
    let body = br#"{
        "type": "event_callback",
        "event": {"type": "message", "channel": "C1", "user": "U1", "text": "translator aws", "ts": "1.0"}
    }"#;
    let Inbound::Event(ChatEvent::Message(msg)) = decode_event_body(body).unwrap() else {
        panic!("expected message event");
    };
    assert_eq!(msg.text, "translator aws");
    assert!(msg.is_from_user());
}

#[test]
fn test_bot_message_is_flagged() {
    let body = br#"{
        "type": "event_callback",
        "event": {"type": "message", "subtype": "bot_message", "bot_id": "B1", "channel": "C1", "text": "translator help", "ts": "1.0"}
    }"#;
    let Inbound::Event(ChatEvent::Message(msg)) = decode_event_body(body).unwrap() else {
        panic!("expected message event");
    };
    assert!(!msg.is_from_user());
}

#[test]
fn test_unhandled_events_are_ignored() {
    let body = br#"{"type":"event_callback","event":{"type":"app_mention","text":"hi"}}"#;
    assert_eq!(decode_event_body(body).unwrap(), Inbound::Ignored);

    let body = br#"{"type":"app_rate_limited","minute_rate_limited":1518467820}"#;
    assert_eq!(decode_event_body(body).unwrap(), Inbound::Ignored);

    let body = br#"{"type":"event_callback","event":{"type":"message","text":"no channel"}}"#;
    assert_eq!(decode_event_body(body).unwrap(), Inbound::Ignored);
}

#[test]
fn test_malformed_event_body() {
    assert!(decode_event_body(b"not json").is_err());
}

#[test]
fn test_shortcut_interaction() {
    let payload = r#"{"type":"shortcut","callback_id":"deepl-translation","trigger_id":"123.456.abc","user":{"id":"U1","username":"kaz"}}"#;
    let body = format!("payload={}", urlencoding::encode(payload));
    let Inbound::Event(ChatEvent::Shortcut(sc)) = decode_interaction_body(body.as_bytes()).unwrap()
    else {
        panic!("expected shortcut");
    };
    assert_eq!(sc.callback_id, "deepl-translation");
    assert_eq!(sc.trigger_id, "123.456.abc");
    assert_eq!(sc.user.as_deref(), Some("U1"));
}

#[test]
fn test_message_action_is_a_shortcut() {
    let payload = r#"{"type":"message_action","callback_id":"deepl-translation","trigger_id":"t1"}"#;
    assert!(matches!(
        decode_interaction_payload(payload).unwrap(),
        Inbound::Event(ChatEvent::Shortcut(_))
    ));
}

#[test]
fn test_view_submission_interaction() {
    let payload = r#"{
        "type": "view_submission",
        "user": {"id": "U1"},
        "view": {
            "id": "V123",
            "callback_id": "run-translation",
            "private_metadata": "",
            "state": {"values": {
                "text": {"a": {"type": "plain_text_input", "value": "Good morning"}},
                "lang": {"a": {"type": "static_select", "selected_option": {"value": "ja"}}}
            }}
        }
    }"#;
    let Inbound::Event(ChatEvent::ViewSubmission(sub)) =
        decode_interaction_payload(payload).unwrap()
    else {
        panic!("expected view submission");
    };
    assert_eq!(sub.view_id, "V123");
    assert_eq!(sub.callback_id, "run-translation");
    assert_eq!(sub.input_value("text", "a"), Some("Good morning"));
    assert_eq!(sub.selected_value("lang", "a"), Some("ja"));
}

#[test]
fn test_unhandled_interaction_is_ignored() {
    let payload = r#"{"type":"block_actions","actions":[]}"#;
    assert_eq!(decode_interaction_payload(payload).unwrap(), Inbound::Ignored);
}

#[test]
fn test_interaction_without_payload_field() {
    assert!(decode_interaction_body(b"foo=bar").is_err());
}

#[test]
fn test_form_field_decoding() {
    let body = b"a=1&payload=%7B%22x%22%3A+%22y+z%22%7D&b=2";
    assert_eq!(form_field(body, "payload").as_deref(), Some(r#"{"x": "y z"}"#));
    assert_eq!(form_field(body, "a").as_deref(), Some("1"));
    assert_eq!(form_field(body, "missing"), None);
}

#[test]
fn test_replies_pagination_cursor() {
    let page: RepliesResponse = serde_json::from_str(
        r#"{"ok":true,"messages":[{"ts":"1.0","text":"root"}],"has_more":true,"response_metadata":{"next_cursor":"bmV4dA=="}}"#,
    )
    .unwrap();
    assert_eq!(page.next_cursor(), Some("bmV4dA=="));
    assert_eq!(page.messages[0].text.as_deref(), Some("root"));

    let last: RepliesResponse = serde_json::from_str(
        r#"{"ok":true,"messages":[],"has_more":false,"response_metadata":{"next_cursor":""}}"#,
    )
    .unwrap();
    assert_eq!(last.next_cursor(), None);
}

#[test]
fn test_follow_cursor_stops_on_repeat_and_cap() {
    assert_eq!(follow_cursor(None, Some("c1"), 1).as_deref(), Some("c1"));
    assert_eq!(follow_cursor(Some("c1"), Some("c2"), 2).as_deref(), Some("c2"));
    assert_eq!(follow_cursor(Some("c1"), None, 2), None);
    assert_eq!(follow_cursor(Some("c1"), Some("c1"), 2), None);
    assert_eq!(follow_cursor(Some("c1"), Some("c2"), MAX_REPLY_PAGES), None);
}

#[test]
fn test_api_error_response() {
    let resp: ApiResponse = serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#).unwrap();
    assert!(!resp.ok);
    assert_eq!(resp.error.as_deref(), Some("channel_not_found"));
}

// --- signature ---

const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

#[test]
fn test_signature_accepts_valid_request() {
    let body = b"payload=%7B%7D";
    let sig = compute_signature(SECRET, "1531420618", body);
    assert!(sig.starts_with("v0="));
    assert_eq!(sig.len(), 3 + 64);
    assert_eq!(
        verify(SECRET, Some("1531420618"), Some(&sig), body, 1531420618 + 10),
        Ok(())
    );
}

#[test]
fn test_signature_rejects_tampered_body() {
    let sig = compute_signature(SECRET, "1531420618", b"original");
    assert_eq!(
        verify(SECRET, Some("1531420618"), Some(&sig), b"tampered", 1531420618),
        Err(SignatureError::Mismatch)
    );
    assert_eq!(
        verify("other-secret", Some("1531420618"), Some(&sig), b"original", 1531420618),
        Err(SignatureError::Mismatch)
    );
}

#[test]
fn test_signature_rejects_replayed_request() {
    let sig = compute_signature(SECRET, "1531420618", b"{}");
    assert_eq!(
        verify(
            SECRET,
            Some("1531420618"),
            Some(&sig),
            b"{}",
            1531420618 + MAX_CLOCK_SKEW_SECS + 1
        ),
        Err(SignatureError::StaleTimestamp)
    );
}

#[test]
fn test_signature_missing_or_bad_headers() {
    assert_eq!(
        verify(SECRET, None, Some("v0=abc"), b"{}", 0),
        Err(SignatureError::MissingHeaders)
    );
    assert_eq!(
        verify(SECRET, Some("1"), None, b"{}", 0),
        Err(SignatureError::MissingHeaders)
    );
    assert_eq!(
        verify(SECRET, Some("yesterday"), Some("v0=abc"), b"{}", 0),
        Err(SignatureError::BadTimestamp)
    );
}

#[test]
fn test_signature_extreme_timestamps_are_stale() {
    for ts in ["-9223372036854775808", "9223372036854775807"] {
        assert_eq!(
            verify(SECRET, Some(ts), Some("v0=00"), b"{}", 1_700_000_000),
            Err(SignatureError::StaleTimestamp)
        );
    }
}

// --- web api ---

fn unreachable_channel() -> SlackChannel {
    SlackChannel::new(SlackConfig {
        bot_token: "xoxb-test".into(),
        ..Default::default()
    })
    .with_base_url("http://127.0.0.1:9")
}

#[test]
fn test_method_url() {
    let ch = unreachable_channel().with_base_url("https://slack.test/api/");
    assert_eq!(
        ch.method_url("chat.postMessage"),
        "https://slack.test/api/chat.postMessage"
    );
    assert_eq!(ch.name(), "slack");
}

#[tokio::test]
async fn test_unreachable_api_is_platform_error() {
    let ch = unreachable_channel();
    let err = ch.replies_in_thread("C1", "1.0").await.unwrap_err();
    assert!(err.to_string().contains("conversations.replies"));

    let err = ch.say("C1", "hi").await.unwrap_err();
    assert!(err.to_string().contains("chat.postMessage"));
}
