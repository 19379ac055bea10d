use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::defaults::*;

/// The closed set of translation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Deepl,
    Google,
    Aws,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [Self::Deepl, Self::Aws, Self::Google];

    /// Name used in commands and config (`"deepl"`, `"google"`, `"aws"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deepl => "deepl",
            Self::Google => "google",
            Self::Aws => "aws",
        }
    }

    /// Name shown to users (e.g. in switch acknowledgements).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deepl => "DeepL",
            Self::Google => "Google",
            Self::Aws => "AWS",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepl" => Ok(Self::Deepl),
            "google" => Ok(Self::Google),
            "aws" => Ok(Self::Aws),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

/// Translation backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Backend active at process start.
    #[serde(default = "default_backend")]
    pub default: BackendKind,
    #[serde(default)]
    pub deepl: DeeplConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            default: default_backend(),
            deepl: DeeplConfig::default(),
            google: GoogleConfig::default(),
            aws: AwsConfig::default(),
        }
    }
}

impl BackendsConfig {
    /// Whether every credential `kind` needs is present.
    pub fn is_configured(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::Deepl => !self.deepl.auth_key.is_empty(),
            BackendKind::Google => {
                !self.google.client_email.is_empty()
                    && !self.google.private_key.is_empty()
                    && !self.google.project_id.is_empty()
            }
            BackendKind::Aws => {
                !self.aws.access_key_id.is_empty() && !self.aws.secret_access_key.is_empty()
            }
        }
    }
}

/// DeepL API config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeeplConfig {
    /// Keys ending in `:fx` belong to the free API.
    #[serde(default)]
    pub auth_key: String,
}

/// Google Cloud Translation (v3) config, authenticated as a service account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_email: String,
    /// PEM-encoded RSA private key of the service account.
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub project_id: String,
}

/// AWS Translate config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "default_aws_region")]
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: default_aws_region(),
        }
    }
}
