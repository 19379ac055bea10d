//! DeepL API backend.
//!
//! Free-plan keys (suffix `:fx`) must use `api-free.deepl.com`; all other
//! keys use `api.deepl.com`.

use async_trait::async_trait;
use reacji_core::{
    config::{BackendKind, DeeplConfig},
    error::{ReacjiError, TranslateError},
    traits::Translator,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const FREE_API_URL: &str = "https://api-free.deepl.com";
const PRO_API_URL: &str = "https://api.deepl.com";

/// DeepL translation backend.
pub struct DeeplTranslator {
    client: reqwest::Client,
    base_url: String,
    auth_key: String,
}

impl DeeplTranslator {
    /// Create from config values.
    pub fn from_config(cfg: &DeeplConfig) -> Result<Self, ReacjiError> {
        if cfg.auth_key.trim().is_empty() {
            return Err(ReacjiError::Config("DEEPL_AUTH_KEY is missing!".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: api_base_url(&cfg.auth_key).to_string(),
            auth_key: cfg.auth_key.clone(),
        })
    }

    /// Point the backend at a different host (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Pick the API host for a key.
pub(crate) fn api_base_url(auth_key: &str) -> &'static str {
    if auth_key.trim_end().ends_with(":fx") {
        FREE_API_URL
    } else {
        PRO_API_URL
    }
}

/// DeepL wants upper-case targets and a regional variant for English.
pub(crate) fn deepl_target_lang(target: &str) -> String {
    match target.to_ascii_lowercase().as_str() {
        "en" => "EN-US".to_string(),
        other => other.to_ascii_uppercase(),
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: String,
}

#[derive(Deserialize)]
pub(crate) struct TranslateResponse {
    pub translations: Option<Vec<DeeplTranslation>>,
}

#[derive(Deserialize)]
pub(crate) struct DeeplTranslation {
    #[allow(dead_code)]
    pub detected_source_language: Option<String>,
    pub text: Option<String>,
}

impl std::fmt::Debug for DeeplTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeeplTranslator")
            .field("auth_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for DeeplTranslator {
    fn name(&self) -> &str {
        "deepl"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Deepl
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!("{}/v2/translate", self.base_url.trim_end_matches('/'));
        let body = TranslateRequest {
            text: [text],
            target_lang: deepl_target_lang(target),
        };
        debug!("deepl: POST {url} target={}", body.target_lang);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("deepl request failed: {e}");
                TranslateError::Provider(format!("deepl request failed: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            let reason = match status.as_u16() {
                403 => "authorization failed",
                429 => "too many requests",
                456 => "quota exceeded",
                _ => "request rejected",
            };
            error!("deepl returned {status} ({reason}): {detail}");
            return Err(TranslateError::Provider(format!(
                "deepl returned {status} ({reason}): {detail}"
            )));
        }

        let parsed: TranslateResponse = resp.json().await.map_err(|e| {
            error!("deepl: failed to parse response: {e}");
            TranslateError::UnexpectedResponse(format!("deepl: {e}"))
        })?;

        extract_text(parsed)
    }
}

/// Pull the first translation out of a parsed response.
pub(crate) fn extract_text(parsed: TranslateResponse) -> Result<String, TranslateError> {
    let translations = parsed.translations.ok_or_else(|| {
        TranslateError::UnexpectedResponse("deepl: missing 'translations'".to_string())
    })?;
    let first = translations.into_iter().next().ok_or(TranslateError::Empty)?;
    match first.text {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(TranslateError::Empty),
    }
}
