//! Slack channel.
//!
//! Outbound calls go to the Web API with the bot token; inbound Events API
//! and interactivity payloads are decoded by [`events`] after their request
//! signature has been checked by [`signature`].
//! Docs: <https://api.slack.com/web>

mod api;
pub mod events;
pub mod signature;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use reacji_core::config::SlackConfig;

const SLACK_API_URL: &str = "https://slack.com/api";

/// Slack channel using the Web API.
pub struct SlackChannel {
    config: SlackConfig,
    client: reqwest::Client,
    base_url: String,
}

impl SlackChannel {
    /// Create a new Slack channel from config.
    pub fn new(config: SlackConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            base_url: SLACK_API_URL.to_string(),
        }
    }

    /// Point the client at a different Web API root (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
