//! Google Cloud Translation (v3) backend.
//!
//! Authenticates as a service account with a self-signed JWT bearer token,
//! which the Translation API accepts directly without an OAuth exchange.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reacji_core::{
    config::{BackendKind, GoogleConfig},
    error::{ReacjiError, TranslateError},
    traits::Translator,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const API_URL: &str = "https://translation.googleapis.com";
const TOKEN_AUDIENCE: &str = "https://translation.googleapis.com/";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Google Cloud Translation backend.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    client_email: String,
    project_id: String,
    signing_key: EncodingKey,
}

impl GoogleTranslator {
    /// Create from config values. The private key is parsed here so a bad
    /// PEM is reported when the backend is activated, not on first use.
    pub fn from_config(cfg: &GoogleConfig) -> Result<Self, ReacjiError> {
        if cfg.client_email.trim().is_empty() {
            return Err(ReacjiError::Config("GOOGLE_CLIENT_EMAIL is missing!".to_string()));
        }
        if cfg.private_key.trim().is_empty() {
            return Err(ReacjiError::Config("GOOGLE_PRIVATE_KEY is missing!".to_string()));
        }
        if cfg.project_id.trim().is_empty() {
            return Err(ReacjiError::Config("GCLOUD_PROJECT is missing!".to_string()));
        }
        let signing_key = EncodingKey::from_rsa_pem(cfg.private_key.as_bytes())
            .map_err(|e| ReacjiError::Config(format!("GOOGLE_PRIVATE_KEY is invalid: {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: API_URL.to_string(),
            client_email: cfg.client_email.clone(),
            project_id: cfg.project_id.clone(),
            signing_key,
        })
    }

    /// Point the backend at a different host (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn bearer_token(&self, now: i64) -> Result<String, TranslateError> {
        let claims = TokenClaims {
            iss: &self.client_email,
            sub: &self.client_email,
            aud: TOKEN_AUDIENCE,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key).map_err(
            |e| {
                error!("google: failed to sign token: {e}");
                TranslateError::Provider(format!("google: failed to sign token: {e}"))
            },
        )
    }

    fn translate_url(&self) -> String {
        format!(
            "{}/v3/projects/{}/locations/global:translateText",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

/// Guess the source language from the target.
///
/// The bot is used in Japanese/English workspaces, so anything translated to
/// English is assumed to be Japanese and everything else English.
pub fn infer_source_language(target: &str) -> &'static str {
    if target.eq_ignore_ascii_case("en") {
        "ja"
    } else {
        "en"
    }
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    source_language_code: &'static str,
    target_language_code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranslateTextResponse {
    pub translations: Option<Vec<GoogleTranslation>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleTranslation {
    pub translated_text: Option<String>,
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("signing_key", &"***")
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Google
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let token = self.bearer_token(chrono::Utc::now().timestamp())?;
        let url = self.translate_url();
        let body = TranslateTextRequest {
            contents: [text],
            mime_type: "text/plain",
            source_language_code: infer_source_language(target),
            target_language_code: target,
        };
        debug!(
            "google: POST {url} source={} target={target}",
            body.source_language_code
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("google request failed: {e}");
                TranslateError::Provider(format!("google request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            error!("google returned {status}: {detail}");
            return Err(TranslateError::Provider(format!(
                "google returned {status}: {detail}"
            )));
        }

        let parsed: TranslateTextResponse = resp.json().await.map_err(|e| {
            error!("google: failed to parse response: {e}");
            TranslateError::UnexpectedResponse(format!("google: {e}"))
        })?;

        let translated = extract_text(parsed, text)?;
        debug!("google: {translated}");
        Ok(translated)
    }
}

/// Pull the first translation out of a parsed response.
pub(crate) fn extract_text(
    parsed: TranslateTextResponse,
    source_text: &str,
) -> Result<String, TranslateError> {
    parsed
        .translations
        .and_then(|t| t.into_iter().next())
        .and_then(|t| t.translated_text)
        .ok_or_else(|| TranslateError::UnexpectedResponse(source_text.to_string()))
}
