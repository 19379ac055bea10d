//! `translator ...` chat commands: backend switching and help.

use crate::registry::BackendRegistry;
use reacji_core::config::BackendKind;

/// Known chat commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Switch(BackendKind),
    Help,
}

impl Command {
    /// Parse a command out of message text.
    ///
    /// Any message containing `translator <name>` matches, wherever it
    /// appears in the text.
    pub fn parse(text: &str) -> Option<Self> {
        if text.contains("translator help") {
            return Some(Self::Help);
        }
        BackendKind::ALL
            .into_iter()
            .find(|kind| text.contains(&format!("translator {}", kind.as_str())))
            .map(Self::Switch)
    }
}

/// Usage line for `translator help`.
pub const HELP_TEXT: &str = "Change translation back-end command `translator [deepl, aws, google]`";

/// Run a command and return the reply text.
pub fn handle(cmd: Command, registry: &BackendRegistry) -> String {
    match cmd {
        Command::Switch(kind) => registry.switch(kind).unwrap_or_else(|err| err),
        Command::Help => format!(
            "{HELP_TEXT}\nCurrent back-end: {}",
            registry.get().kind().display_name()
        ),
    }
}
