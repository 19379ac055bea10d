//! Block Kit modal payloads for the translation runner.

use serde_json::{json, Value};

pub const RUN_CALLBACK_ID: &str = "run-translation";
pub const NEW_RUNNER_CALLBACK_ID: &str = "new-runner";
pub const TEXT_BLOCK_ID: &str = "text";
pub const LANG_BLOCK_ID: &str = "lang";
pub const ACTION_ID: &str = "a";
pub const FAILED_PLACEHOLDER: &str = ":x: Failed to translate it for some reason";

const TITLE: &str = "Translation Runner";

/// Languages offered in the target select, `(code, label)`.
pub const RUNNER_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ja", "Japanese"),
    ("zh", "Chinese"),
    ("ko", "Korean"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("ru", "Russian"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("el", "Greek"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("hu", "Hungarian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ro", "Romanian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
];

fn label_for(code: &str) -> &str {
    RUNNER_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

fn plain_text(text: &str) -> Value {
    json!({ "type": "plain_text", "text": text, "emoji": true })
}

fn option(code: &str) -> Value {
    json!({ "text": plain_text(label_for(code)), "value": code })
}

/// Input modal (Idle). `lang` pre-selects the target language.
pub fn build_new_modal(lang: Option<&str>) -> Value {
    let options: Vec<Value> = RUNNER_LANGUAGES.iter().map(|(code, _)| option(code)).collect();
    let mut select = json!({
        "type": "static_select",
        "action_id": ACTION_ID,
        "placeholder": plain_text("Select a language"),
        "options": options,
    });
    if let Some(code) = lang.filter(|c| RUNNER_LANGUAGES.iter().any(|(k, _)| k == c)) {
        select["initial_option"] = option(code);
    }

    json!({
        "type": "modal",
        "callback_id": RUN_CALLBACK_ID,
        "title": plain_text(TITLE),
        "submit": plain_text("Translate"),
        "close": plain_text("Close"),
        "private_metadata": lang.unwrap_or_default(),
        "blocks": [
            {
                "type": "input",
                "block_id": TEXT_BLOCK_ID,
                "label": plain_text("Text"),
                "element": {
                    "type": "plain_text_input",
                    "action_id": ACTION_ID,
                    "multiline": true,
                },
            },
            {
                "type": "input",
                "block_id": LANG_BLOCK_ID,
                "label": plain_text("Target language"),
                "element": select,
            },
        ],
    })
}

/// Shown while the translation is running (Loading).
pub fn build_loading_view(lang: &str, text: &str) -> Value {
    json!({
        "type": "modal",
        "callback_id": NEW_RUNNER_CALLBACK_ID,
        "title": plain_text(TITLE),
        "close": plain_text("Close"),
        "private_metadata": lang,
        "blocks": [
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": format!(":hourglass_flowing_sand: Translating into {}...", label_for(lang)) },
            },
            { "type": "divider" },
            {
                "type": "section",
                "text": { "type": "plain_text", "text": text },
            },
        ],
    })
}

/// Final view with the translation (Result). Submitting it starts over.
pub fn build_result_view(lang: &str, text: &str, translated: &str) -> Value {
    json!({
        "type": "modal",
        "callback_id": NEW_RUNNER_CALLBACK_ID,
        "title": plain_text(TITLE),
        "submit": plain_text("Try Another"),
        "close": plain_text("Close"),
        "private_metadata": lang,
        "blocks": [
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": format!("*{}*", label_for(lang)) },
            },
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": translated },
            },
            { "type": "divider" },
            {
                "type": "context",
                "elements": [{ "type": "plain_text", "text": text }],
            },
        ],
    })
}

/// Ack replacing the submitted view with `view`.
pub fn update_ack(view: Value) -> Value {
    json!({ "response_action": "update", "view": view })
}

/// Ack rejecting a submission with per-block messages.
pub fn errors_ack(errors: &[(&str, &str)]) -> Value {
    let map: serde_json::Map<String, Value> = errors
        .iter()
        .map(|(block, msg)| (block.to_string(), Value::String(msg.to_string())))
        .collect();
    json!({ "response_action": "errors", "errors": map })
}
