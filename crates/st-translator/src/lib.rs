mod client;
mod response;

pub use client::SimplyTranslateClient;
pub use response::TranslationResponse;

pub type LanguageCode = String;

/// Pseudo language code asking the backend to detect the source language
pub const AUTO_DETECT: &str = "auto";

/// Engine used when the caller does not pick one
pub const DEFAULT_ENGINE: &str = "google";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single request. Implementations never retry.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One translate invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    pub engine: String,
    pub text: String,
}

impl TranslationRequest {
    pub fn new(
        source_language: impl Into<LanguageCode>,
        target_language: impl Into<LanguageCode>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            engine: DEFAULT_ENGINE.to_string(),
            text: text.into(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub source_language_detected: Option<LanguageCode>,
    pub pronunciation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upstream error: HTTP {status}")]
    UpstreamError { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return TranslateError::UpstreamError {
                status: status.as_u16(),
            };
        }

        if err.is_decode() {
            return TranslateError::MalformedResponse(err.to_string());
        }

        // timeouts, refused connections, DNS and body read failures
        TranslateError::NetworkError(err.to_string())
    }
}
