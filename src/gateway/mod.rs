//! Gateway: routes decoded platform events to reacjilation, commands, and the runner.


use crate::{
    commands::{self, Command},
    reacjilator,
    registry::BackendRegistry,
    runner::{self, views, RunRequest},
};
use reacji_core::{
    event::{ChatEvent, MessageEvent, ShortcutEvent, ViewSubmission},
    traits::ChatPlatform,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Connects one chat platform to the backend registry.
pub struct Gateway {
    platform: Arc<dyn ChatPlatform>,
    registry: Arc<BackendRegistry>,
    shortcut_callback_id: String,
}

impl Gateway {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        registry: Arc<BackendRegistry>,
        shortcut_callback_id: impl Into<String>,
    ) -> Self {
        info!(
            "gateway on {} with backend {}",
            platform.name(),
            registry.get().name()
        );
        Self {
            platform,
            registry,
            shortcut_callback_id: shortcut_callback_id.into(),
        }
    }

    /// Name of the active translation backend.
    pub fn backend_name(&self) -> String {
        self.registry.get().name().to_string()
    }

    /// Handle an event to completion.
    pub async fn dispatch(&self, event: ChatEvent) {
        match event {
            ChatEvent::ReactionAdded(ev) => {
                let outcome =
                    reacjilator::handle_reaction(&ev, self.platform.as_ref(), &self.registry).await;
                debug!("reaction :{}: -> {outcome:?}", ev.reaction);
            }
            ChatEvent::Message(msg) => self.handle_message(&msg).await,
            ChatEvent::Shortcut(sc) => self.handle_shortcut(&sc).await,
            // Submissions need a synchronous answer and go through `acknowledge`.
            ChatEvent::ViewSubmission(sub) => {
                debug!("ignoring dispatched submission of view {}", sub.callback_id);
            }
        }
    }

    /// Synchronous answer for an inbound event, with any follow-up work spawned.
    ///
    /// Returns the body to reply with, or `None` for an empty 200.
    pub fn acknowledge(self: &Arc<Self>, event: ChatEvent) -> Option<Value> {
        match event {
            ChatEvent::ViewSubmission(sub) => self.acknowledge_submission(sub),
            other => {
                let gw = Arc::clone(self);
                tokio::spawn(async move { gw.dispatch(other).await });
                None
            }
        }
    }

    fn acknowledge_submission(self: &Arc<Self>, sub: ViewSubmission) -> Option<Value> {
        match sub.callback_id.as_str() {
            views::RUN_CALLBACK_ID => match RunRequest::from_submission(&sub) {
                Ok(req) => {
                    let ack = req.loading_ack();
                    let gw = Arc::clone(self);
                    tokio::spawn(async move { gw.finish_run(&req).await });
                    Some(ack)
                }
                Err(errors) => Some(errors),
            },
            views::NEW_RUNNER_CALLBACK_ID => Some(runner::new_runner_ack(&sub)),
            other => {
                debug!("ignoring submission of view {other}");
                None
            }
        }
    }

    async fn finish_run(&self, req: &RunRequest) {
        // Errors are logged by the runner.
        let _ = runner::run_translation(req, self.platform.as_ref(), &self.registry).await;
    }

    async fn handle_message(&self, msg: &MessageEvent) {
        if !msg.is_from_user() {
            return;
        }
        let Some(cmd) = Command::parse(&msg.text) else {
            return;
        };
        info!("command {cmd:?} in {}", msg.channel);
        let reply = commands::handle(cmd, &self.registry);
        if let Err(e) = self.platform.say(&msg.channel, &reply).await {
            warn!("could not answer command in {}: {e}", msg.channel);
        }
    }

    async fn handle_shortcut(&self, sc: &ShortcutEvent) {
        if sc.callback_id != self.shortcut_callback_id {
            debug!("ignoring shortcut {}", sc.callback_id);
            return;
        }
        if let Err(e) = runner::open_modal(self.platform.as_ref(), &sc.trigger_id).await {
            warn!("could not open runner modal: {e}");
        }
    }
}
