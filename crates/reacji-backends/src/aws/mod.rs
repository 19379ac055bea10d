//! AWS Translate backend.
//!
//! Calls the JSON 1.1 `TranslateText` action directly, signed with SigV4.
//! Source language is always `auto`.

pub mod sigv4;

use async_trait::async_trait;
use reacji_core::{
    config::{AwsConfig, BackendKind},
    error::{ReacjiError, TranslateError},
    traits::Translator,
};
use serde::{Deserialize, Serialize};
use sigv4::{Credentials, SigningRequest};
use tracing::{debug, error};

const SERVICE: &str = "translate";
const TARGET: &str = "AWSShineFrontendService_20170701.TranslateText";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// AWS Translate backend.
pub struct AwsTranslator {
    client: reqwest::Client,
    credentials: Credentials,
    region: String,
    endpoint: Option<String>,
}

impl AwsTranslator {
    /// Create from config values.
    pub fn from_config(cfg: &AwsConfig) -> Result<Self, ReacjiError> {
        if cfg.access_key_id.trim().is_empty() {
            return Err(ReacjiError::Config("AWS_ACCESS_KEY_ID is missing!".to_string()));
        }
        if cfg.secret_access_key.trim().is_empty() {
            return Err(ReacjiError::Config(
                "AWS_SECRET_ACCESS_KEY is missing!".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            credentials: Credentials {
                access_key_id: cfg.access_key_id.clone(),
                secret_access_key: cfg.secret_access_key.clone(),
            },
            region: cfg.region.clone(),
            endpoint: None,
        })
    }

    /// Send requests to `endpoint` instead of the regional host. The request
    /// is still signed for the regional host.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn host(&self) -> String {
        format!("translate.{}.amazonaws.com", self.region)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextRequest<'a> {
    source_language_code: &'static str,
    target_language_code: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TranslateTextResponse {
    pub translated_text: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct AwsErrorBody {
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

/// Human-readable summary of an AWS JSON error body.
pub(crate) fn describe_error(body: &str) -> String {
    match serde_json::from_str::<AwsErrorBody>(body) {
        Ok(err) => {
            let kind = err
                .error_type
                .as_deref()
                .map(|t| t.rsplit('#').next().unwrap_or(t))
                .unwrap_or("UnknownError");
            match err.message {
                Some(m) => format!("{kind}: {m}"),
                None => kind.to_string(),
            }
        }
        Err(_) => body.to_string(),
    }
}

impl std::fmt::Debug for AwsTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsTranslator")
            .field("access_key_id", &self.credentials.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    fn name(&self) -> &str {
        "aws"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Aws
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let body = serde_json::to_vec(&TranslateTextRequest {
            source_language_code: "auto",
            target_language_code: target,
            text,
        })
        .map_err(|e| TranslateError::Provider(format!("aws: failed to encode request: {e}")))?;

        let host = self.host();
        let signed = sigv4::sign(
            &self.credentials,
            &self.region,
            SERVICE,
            &SigningRequest {
                method: "POST",
                host: &host,
                path: "/",
                query: "",
                headers: &[("content-type", CONTENT_TYPE), ("x-amz-target", TARGET)],
                payload: &body,
            },
            chrono::Utc::now(),
        );

        let url = self
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{host}/"));
        debug!("aws: POST {url} target={target}");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", TARGET)
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("aws request failed: {e}");
                TranslateError::Provider(format!("aws request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = describe_error(&resp.text().await.unwrap_or_default());
            error!("aws returned {status}: {detail}");
            return Err(TranslateError::Provider(format!(
                "aws returned {status}: {detail}"
            )));
        }

        let parsed: TranslateTextResponse = resp.json().await.map_err(|e| {
            error!("aws: failed to parse response: {e}");
            TranslateError::UnexpectedResponse(format!("aws: {e}"))
        })?;

        match parsed.translated_text {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(TranslateError::Empty),
        }
    }
}
