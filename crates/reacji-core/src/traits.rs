use crate::{
    config::BackendKind,
    error::{ReacjiError, TranslateError},
    event::ThreadMessage,
};
use async_trait::async_trait;

/// Translation backend trait.
///
/// Every provider (DeepL, Google Cloud Translate, AWS Translate) implements
/// this trait to give the bot one uniform `translate` call.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Which provider this is.
    fn kind(&self) -> BackendKind;

    /// Translate `text` into `target` (lower-case language code).
    ///
    /// Implementations catch and log every provider failure and report it as
    /// a `TranslateError`; they never panic on remote errors.
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

/// Chat platform trait.
///
/// The operations the bot needs from the workspace it lives in. Views are
/// passed as the platform's own JSON payloads.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Human-readable platform name.
    fn name(&self) -> &str;

    /// Full message history of the thread rooted at `ts`, root first.
    async fn replies_in_thread(
        &self,
        channel: &str,
        ts: &str,
    ) -> Result<Vec<ThreadMessage>, ReacjiError>;

    /// Post `text` as a threaded reply under `root`.
    async fn say_in_thread(
        &self,
        channel: &str,
        text: &str,
        root: &ThreadMessage,
    ) -> Result<(), ReacjiError>;

    /// Post a plain message to a channel.
    async fn say(&self, channel: &str, text: &str) -> Result<(), ReacjiError>;

    /// Open a modal in response to a trigger.
    async fn open_view(&self, trigger_id: &str, view: &serde_json::Value)
        -> Result<(), ReacjiError>;

    /// Replace the content of an open modal.
    async fn update_view(&self, view_id: &str, view: &serde_json::Value)
        -> Result<(), ReacjiError>;
}
