mod backends;
mod defaults;
mod slack;


pub use backends::*;
pub use slack::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ReacjiError;
use defaults::*;

/// Top-level reacjilator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reacjilator: GeneralConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendsConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Overlay values from environment variables onto this config.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production. Empty values are
    /// ignored so a blank variable cannot wipe a value from the file.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ReacjiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("SLACK_BOT_TOKEN") {
            self.slack.bot_token = v;
        }
        if let Some(v) = get("SLACK_SIGNING_SECRET") {
            self.slack.signing_secret = v;
        }
        if let Some(v) = get("SLACK_LOG_LEVEL") {
            self.reacjilator.log_level = v.to_lowercase();
        }
        if let Some(v) = get("PORT") {
            self.server.port = v
                .parse()
                .map_err(|e| ReacjiError::Config(format!("invalid PORT {v:?}: {e}")))?;
        }
        if let Some(v) = get("TRANSLATOR_BACKEND") {
            self.backend.default = v.parse().map_err(ReacjiError::Config)?;
        }
        if let Some(v) = get("DEEPL_AUTH_KEY") {
            self.backend.deepl.auth_key = v;
        }
        if let Some(v) = get("GOOGLE_CLIENT_EMAIL") {
            self.backend.google.client_email = v;
        }
        if let Some(v) = get("GOOGLE_PRIVATE_KEY") {
            self.backend.google.private_key = v;
        }
        if let Some(v) = get("GCLOUD_PROJECT") {
            self.backend.google.project_id = v;
        }
        if let Some(v) = get("AWS_ACCESS_KEY_ID") {
            self.backend.aws.access_key_id = v;
        }
        if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
            self.backend.aws.secret_access_key = v;
        }
        if let Some(v) = get("AWS_REGION") {
            self.backend.aws.region = v;
        }

        // Keys pasted into env files usually carry escaped newlines.
        if self.backend.google.private_key.contains("\\n") {
            self.backend.google.private_key = self.backend.google.private_key.replace("\\n", "\n");
        }

        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Environment overrides
/// are applied separately with [`Config::apply_env`].
pub fn load(path: &str) -> Result<Config, ReacjiError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ReacjiError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| ReacjiError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}

/// Load the config file and overlay the process environment.
pub fn load_with_env(path: &str) -> Result<Config, ReacjiError> {
    let mut config = load(path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}
