//! Flag-emoji reacjilation: translate the reacted message and reply in its thread.

use crate::registry::BackendRegistry;
use reacji_core::{
    error::ReacjiError,
    event::{ReactionEvent, ThreadMessage},
    language::language_for_emoji,
    traits::ChatPlatform,
};
use tracing::{debug, info, warn};

/// What happened to one reaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReacjiOutcome {
    /// Nothing was posted.
    Discarded(&'static str),
    /// The thread already contains this exact text.
    AlreadyPosted,
    /// A reply was posted with this text.
    Posted(String),
}

/// Target language for a reaction, or `None` if the event is not a
/// reaction on a message or the emoji is not a known flag.
pub fn lang(event: &ReactionEvent) -> Option<&'static str> {
    event.message_target()?;
    language_for_emoji(&event.reaction)
}

/// Full message history of the thread rooted at `ts`.
pub async fn replies_in_thread(
    platform: &dyn ChatPlatform,
    channel: &str,
    ts: &str,
) -> Result<Vec<ThreadMessage>, ReacjiError> {
    platform.replies_in_thread(channel, ts).await
}

/// Whether any message in the thread already has exactly `candidate` as its text.
pub fn is_already_posted(replies: &[ThreadMessage], candidate: &str) -> bool {
    replies
        .iter()
        .any(|m| m.text.as_deref() == Some(candidate))
}

/// Post `text` as a threaded reply to `root`.
pub async fn say_in_thread(
    platform: &dyn ChatPlatform,
    channel: &str,
    text: &str,
    root: &ThreadMessage,
) -> Result<(), ReacjiError> {
    platform.say_in_thread(channel, text, root).await
}

/// Handle one `reaction_added` event end to end.
pub async fn handle_reaction(
    event: &ReactionEvent,
    platform: &dyn ChatPlatform,
    registry: &BackendRegistry,
) -> ReacjiOutcome {
    let Some((channel, ts)) = event.message_target() else {
        debug!("reaction is not on a message, ignoring");
        return ReacjiOutcome::Discarded("not a message reaction");
    };
    let Some(target) = lang(event) else {
        debug!("no language for :{}:", event.reaction);
        return ReacjiOutcome::Discarded("unmapped emoji");
    };

    let replies = match replies_in_thread(platform, channel, ts).await {
        Ok(r) => r,
        Err(e) => {
            warn!("could not fetch thread {channel}/{ts}: {e}");
            return ReacjiOutcome::Discarded("thread fetch failed");
        }
    };
    let Some(root) = replies.first() else {
        return ReacjiOutcome::Discarded("empty thread");
    };
    let Some(text) = root.text.as_deref().filter(|t| !t.is_empty()) else {
        return ReacjiOutcome::Discarded("root has no text");
    };

    let backend = registry.get();
    let candidate = match backend.translate(text, target).await {
        Ok(translated) => translated,
        Err(e) => match e.user_text() {
            Some(msg) => msg,
            None => return ReacjiOutcome::Discarded("empty translation"),
        },
    };

    if is_already_posted(&replies, &candidate) {
        debug!("translation already in thread {channel}/{ts}");
        return ReacjiOutcome::AlreadyPosted;
    }

    match say_in_thread(platform, channel, &candidate, root).await {
        Ok(()) => {
            info!(
                "reacjilated {channel}/{ts} into {target} via {}",
                backend.name()
            );
            ReacjiOutcome::Posted(candidate)
        }
        Err(e) => {
            warn!("could not reply in thread {channel}/{ts}: {e}");
            ReacjiOutcome::Discarded("reply failed")
        }
    }
}
