//! Web API calls: thread history, posting, and modal views.

use super::{
    types::{ApiResponse, RepliesResponse},
    SlackChannel,
};
use async_trait::async_trait;
use reacji_core::{error::ReacjiError, event::ThreadMessage, traits::ChatPlatform};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Page size for `conversations.replies`.
const REPLIES_PAGE_LIMIT: u32 = 200;

/// Upper bound on `conversations.replies` pages fetched for one thread.
pub(super) const MAX_REPLY_PAGES: usize = 50;

/// Cursor to fetch next, or `None` when paging should stop.
///
/// Stops on the last page, on a cursor that repeats the current one, and
/// once `pages_fetched` reaches [`MAX_REPLY_PAGES`].
pub(super) fn follow_cursor(
    current: Option<&str>,
    next: Option<&str>,
    pages_fetched: usize,
) -> Option<String> {
    let next = next?;
    if current == Some(next) {
        warn!("slack: conversations.replies repeated cursor {next}, stopping");
        return None;
    }
    if pages_fetched >= MAX_REPLY_PAGES {
        warn!("slack: thread exceeds {MAX_REPLY_PAGES} reply pages, truncating");
        return None;
    }
    Some(next.to_string())
}

impl SlackChannel {
    pub(super) fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url.trim_end_matches('/'))
    }

    /// POST a JSON body to a Web API method and check the `ok` flag.
    async fn post_method<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<(), ReacjiError> {
        let resp = self
            .client
            .post(self.method_url(method))
            .bearer_auth(&self.config.bot_token)
            .json(body)
            .send()
            .await
            .map_err(|e| ReacjiError::Platform(format!("slack {method} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ReacjiError::Platform(format!(
                "slack {method} failed ({status}): {error_text}"
            )));
        }

        let parsed: ApiResponse = resp
            .json()
            .await
            .map_err(|e| ReacjiError::Platform(format!("slack {method}: bad response: {e}")))?;
        if !parsed.ok {
            let reason = parsed.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(ReacjiError::Platform(format!("slack {method}: {reason}")));
        }
        Ok(())
    }

    /// Fetch one page of `conversations.replies`.
    async fn replies_page(
        &self,
        channel: &str,
        ts: &str,
        cursor: Option<&str>,
    ) -> Result<RepliesResponse, ReacjiError> {
        let limit = REPLIES_PAGE_LIMIT.to_string();
        let mut query = vec![("channel", channel), ("ts", ts), ("limit", limit.as_str())];
        if let Some(c) = cursor {
            query.push(("cursor", c));
        }

        let resp = self
            .client
            .get(self.method_url("conversations.replies"))
            .bearer_auth(&self.config.bot_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                ReacjiError::Platform(format!("slack conversations.replies failed: {e}"))
            })?;

        let parsed: RepliesResponse = resp.json().await.map_err(|e| {
            ReacjiError::Platform(format!("slack conversations.replies: bad response: {e}"))
        })?;
        if !parsed.ok {
            let reason = parsed
                .error
                .clone()
                .unwrap_or_else(|| "unknown_error".to_string());
            return Err(ReacjiError::Platform(format!(
                "slack conversations.replies: {reason}"
            )));
        }
        Ok(parsed)
    }
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

#[async_trait]
impl ChatPlatform for SlackChannel {
    fn name(&self) -> &str {
        "slack"
    }

    async fn replies_in_thread(
        &self,
        channel: &str,
        ts: &str,
    ) -> Result<Vec<ThreadMessage>, ReacjiError> {
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;
        loop {
            let mut page = self.replies_page(channel, ts, cursor.as_deref()).await?;
            pages += 1;
            let next = follow_cursor(cursor.as_deref(), page.next_cursor(), pages);
            messages.append(&mut page.messages);
            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }
        debug!(
            "slack: {} message(s) in thread {channel}/{ts}",
            messages.len()
        );
        Ok(messages)
    }

    async fn say_in_thread(
        &self,
        channel: &str,
        text: &str,
        root: &ThreadMessage,
    ) -> Result<(), ReacjiError> {
        self.post_method(
            "chat.postMessage",
            &PostMessage {
                channel,
                text,
                thread_ts: Some(root.reply_thread_ts()),
            },
        )
        .await
    }

    async fn say(&self, channel: &str, text: &str) -> Result<(), ReacjiError> {
        self.post_method(
            "chat.postMessage",
            &PostMessage {
                channel,
                text,
                thread_ts: None,
            },
        )
        .await
    }

    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<(), ReacjiError> {
        let body = serde_json::json!({ "trigger_id": trigger_id, "view": view });
        self.post_method("views.open", &body).await
    }

    async fn update_view(&self, view_id: &str, view: &Value) -> Result<(), ReacjiError> {
        let body = serde_json::json!({ "view_id": view_id, "view": view });
        self.post_method("views.update", &body).await
    }
}
