//! The active translation backend, swappable at runtime.

use reacji_backends::{aws::AwsTranslator, deepl::DeeplTranslator, google::GoogleTranslator};
use reacji_core::{
    config::{BackendKind, BackendsConfig},
    error::ReacjiError,
    traits::Translator,
};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Build a backend from its credentials.
pub fn generate_backend(
    kind: BackendKind,
    cfg: &BackendsConfig,
) -> Result<Arc<dyn Translator>, ReacjiError> {
    let backend: Arc<dyn Translator> = match kind {
        BackendKind::Deepl => Arc::new(DeeplTranslator::from_config(&cfg.deepl)?),
        BackendKind::Google => Arc::new(GoogleTranslator::from_config(&cfg.google)?),
        BackendKind::Aws => Arc::new(AwsTranslator::from_config(&cfg.aws)?),
    };
    Ok(backend)
}

/// Holds the one backend all translation requests go through.
///
/// Callers take a snapshot with [`get`](Self::get) at the start of a request;
/// a later swap never affects a request already in flight.
pub struct BackendRegistry {
    active: RwLock<Arc<dyn Translator>>,
    config: BackendsConfig,
}

impl BackendRegistry {
    /// Create a registry with `initial` active.
    pub fn new(initial: Arc<dyn Translator>, config: BackendsConfig) -> Self {
        Self {
            active: RwLock::new(initial),
            config,
        }
    }

    /// Create a registry with the configured default backend active.
    pub fn from_config(config: BackendsConfig) -> Result<Self, ReacjiError> {
        let initial = generate_backend(config.default, &config)?;
        info!("translation backend: {}", initial.kind().display_name());
        Ok(Self::new(initial, config))
    }

    /// The currently active backend.
    pub fn get(&self) -> Arc<dyn Translator> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the active backend.
    pub fn set(&self, backend: Arc<dyn Translator>) {
        let mut active = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = backend;
    }

    /// Generate and activate `kind`.
    ///
    /// Returns the line to post back to the channel. On failure the active
    /// backend stays as it was.
    pub fn switch(&self, kind: BackendKind) -> Result<String, String> {
        match generate_backend(kind, &self.config) {
            Ok(backend) => {
                self.set(backend);
                info!("translation backend switched to {}", kind.display_name());
                Ok(switched_ack(kind))
            }
            Err(e) => {
                warn!("could not switch to {}: {e}", kind.display_name());
                Err(format!(
                    "Could not switch to {} translation API: {}",
                    kind.display_name(),
                    config_reason(&e)
                ))
            }
        }
    }
}

/// Acknowledgement posted after a successful switch.
pub fn switched_ack(kind: BackendKind) -> String {
    format!(
        "Changed, This service is working on {} translation API.",
        kind.display_name()
    )
}

fn config_reason(e: &ReacjiError) -> String {
    match e {
        ReacjiError::Config(msg) => msg.clone(),
        other => other.to_string(),
    }
}
