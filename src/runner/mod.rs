//! Interactive translation modal.
//!
//! A shortcut opens the input modal. Submitting it swaps in a loading view
//! right away, translates in the background, then replaces the loading view
//! with the result. The result view's submit button starts over with the
//! same target language.

pub mod views;

use crate::registry::BackendRegistry;
use reacji_core::{error::ReacjiError, event::ViewSubmission, traits::ChatPlatform};
use serde_json::Value;
use tracing::{debug, warn};
use views::*;

/// A validated `run-translation` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub view_id: String,
    pub text: String,
    pub lang: String,
}

impl RunRequest {
    /// Read text and language out of a submission. On failure returns the
    /// validation ack to send back instead.
    pub fn from_submission(sub: &ViewSubmission) -> Result<Self, Value> {
        let text = sub
            .input_value(TEXT_BLOCK_ID, ACTION_ID)
            .filter(|t| !t.trim().is_empty());
        let lang = sub
            .selected_value(LANG_BLOCK_ID, ACTION_ID)
            .filter(|l| !l.is_empty());

        match (text, lang) {
            (Some(text), Some(lang)) => Ok(Self {
                view_id: sub.view_id.clone(),
                text: text.to_string(),
                lang: lang.to_string(),
            }),
            (text, lang) => {
                let mut errors = Vec::new();
                if text.is_none() {
                    errors.push((TEXT_BLOCK_ID, "Enter some text to translate."));
                }
                if lang.is_none() {
                    errors.push((LANG_BLOCK_ID, "Choose a target language."));
                }
                Err(errors_ack(&errors))
            }
        }
    }

    /// Immediate ack showing the loading view.
    pub fn loading_ack(&self) -> Value {
        update_ack(build_loading_view(&self.lang, &self.text))
    }
}

/// Open a blank input modal.
pub async fn open_modal(platform: &dyn ChatPlatform, trigger_id: &str) -> Result<(), ReacjiError> {
    platform.open_view(trigger_id, &build_new_modal(None)).await
}

/// Translate a submitted request and show the result in its modal.
pub async fn run_translation(
    req: &RunRequest,
    platform: &dyn ChatPlatform,
    registry: &BackendRegistry,
) -> Result<(), ReacjiError> {
    let backend = registry.get();
    let translated = match backend.translate(&req.text, &req.lang).await {
        Ok(t) => t,
        Err(e) => {
            debug!("runner translation failed via {}: {e}", backend.name());
            FAILED_PLACEHOLDER.to_string()
        }
    };
    let view = build_result_view(&req.lang, &req.text, &translated);
    platform
        .update_view(&req.view_id, &view)
        .await
        .inspect_err(|e| warn!("could not show runner result: {e}"))
}

/// Ack for the result view's submit: a fresh modal with the same language.
pub fn new_runner_ack(sub: &ViewSubmission) -> Value {
    let lang = Some(sub.private_metadata.as_str()).filter(|l| !l.is_empty());
    update_ack(build_new_modal(lang))
}
