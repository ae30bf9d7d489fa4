use std::time::Duration;

use async_trait::async_trait;

use crate::response::TranslationResponse;
use crate::{ProviderMetadata, TranslateError, TranslationRequest, TranslationResult, Translator};

const DEFAULT_USER_AGENT: &str = concat!("st-translate/", env!("CARGO_PKG_VERSION"));

/// Client for the SimplyTranslate `api/translate/` endpoint
#[derive(Clone)]
pub struct SimplyTranslateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SimplyTranslateClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TranslateError> {
        Self::with_user_agent(base_url, timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/api/translate/", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Translator for SimplyTranslateClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let params = [
            ("engine", request.engine.as_str()),
            ("from", request.source_language.as_str()),
            ("to", request.target_language.as_str()),
            ("text", request.text.as_str()),
        ];

        tracing::debug!(
            "GET {} ({} -> {}, {} chars)",
            self.endpoint,
            request.source_language,
            request.target_language,
            request.text.chars().count()
        );

        let response = self.client.get(&self.endpoint).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("translate endpoint answered HTTP {}", status);
            return Err(TranslateError::UpstreamError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed = TranslationResponse::parse(&body)?;

        Ok(parsed.into())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "SimplyTranslate".to_string(),
        }
    }
}
