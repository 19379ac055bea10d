use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Slack app config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot user OAuth token (`xoxb-...`).
    #[serde(default)]
    pub bot_token: String,
    /// Signing secret used to verify inbound requests. Empty disables verification.
    #[serde(default)]
    pub signing_secret: String,
    /// Callback id of the shortcut that opens the translation modal.
    #[serde(default = "default_shortcut_callback")]
    pub shortcut_callback_id: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            signing_secret: String::new(),
            shortcut_callback_id: default_shortcut_callback(),
        }
    }
}

/// HTTP receiver config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
