use thiserror::Error;

/// Top-level error type for reacjilator.
#[derive(Debug, Error)]
pub enum ReacjiError {
    /// Missing or invalid configuration (credentials, config file).
    #[error("config error: {0}")]
    Config(String),

    /// Error from the chat platform API.
    #[error("platform error: {0}")]
    Platform(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a `translate` call produced no usable translation.
///
/// Backends log the underlying failure and hand one of these back as a
/// value; callers branch on the variant instead of inspecting text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The provider answered without any translated text.
    #[error("empty translation")]
    Empty,

    /// Network, auth, quota, or rate-limit failure.
    #[error("Failed: {0}")]
    Provider(String),

    /// The provider answered with a body we could not read a translation from.
    #[error("Unexpected Response: {0}")]
    UnexpectedResponse(String),
}

impl TranslateError {
    /// Text to show in the chat when this failure is reported to users.
    ///
    /// `Empty` has nothing worth posting and returns `None`.
    pub fn user_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReacjiError::Config("DEEPL_API_KEY is missing!".into()).to_string(),
            "config error: DEEPL_API_KEY is missing!"
        );
        let parse: ReacjiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(parse, ReacjiError::Serialization(_)));
        assert!(parse.to_string().starts_with("serialization error: "));
    }

    #[test]
    fn test_translate_error_display() {
        assert_eq!(
            TranslateError::Provider("403 Forbidden".into()).to_string(),
            "Failed: 403 Forbidden"
        );
        assert_eq!(
            TranslateError::UnexpectedResponse("no translations".into()).to_string(),
            "Unexpected Response: no translations"
        );
    }

    #[test]
    fn test_user_text_skips_empty() {
        assert_eq!(TranslateError::Empty.user_text(), None);
        assert_eq!(
            TranslateError::Provider("timeout".into()).user_text().as_deref(),
            Some("Failed: timeout")
        );
    }
}
