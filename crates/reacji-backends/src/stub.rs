//! Scripted translator for tests.

use async_trait::async_trait;
use reacji_core::{config::BackendKind, error::TranslateError, traits::Translator};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Translator that answers from a script.
///
/// Unscripted calls return `"[{target}] {text}"`. Every call is recorded.
pub struct StubTranslator {
    name: String,
    kind: BackendKind,
    replies: HashMap<(String, String), Result<String, TranslateError>>,
    fallback: Option<Result<String, TranslateError>>,
    transient_failures: AtomicUsize,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubTranslator {
    pub fn new(name: impl Into<String>, kind: BackendKind) -> Self {
        Self {
            name: name.into(),
            kind,
            replies: HashMap::new(),
            fallback: None,
            transient_failures: AtomicUsize::new(0),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `result` when asked to translate `text` into `target`.
    pub fn with_reply(
        mut self,
        text: &str,
        target: &str,
        result: Result<String, TranslateError>,
    ) -> Self {
        self.replies
            .insert((text.to_string(), target.to_string()), result);
        self
    }

    /// Answer `result` for every unscripted call.
    pub fn with_fallback(mut self, result: Result<String, TranslateError>) -> Self {
        self.fallback = Some(result);
        self
    }

    /// Fail the first `n` calls with a provider error before answering normally.
    pub fn with_transient_failures(self, n: usize) -> Self {
        self.transient_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Sleep before answering, to keep a call in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `(text, target)` of every call so far, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Translator for StubTranslator {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((text.to_string(), target.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failed = self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(TranslateError::Provider(
                "simulated transient failure".to_string(),
            ));
        }

        if let Some(result) = self.replies.get(&(text.to_string(), target.to_string())) {
            return result.clone();
        }
        match &self.fallback {
            Some(result) => result.clone(),
            None => Ok(format!("[{target}] {text}")),
        }
    }
}
