// @zen-component: CHAT-OpenAICompatibleProvider
//
//! OpenAI-compatible chat-completion provider.
//!
//! Posts to a `/chat/completions` endpoint (Groq by default) with a bearer
//! credential. Every call is bounded by the client timeout. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{CompletionError, CompletionProvider, CompletionRequest, CompletionResponse};

/// Default completion endpoint.
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Key sent when none is configured; the upstream rejects it.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GROQ_API_KEY_HERE";

/// HTTP client for an OpenAI-compatible completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatible {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenAiCompatible {
    /// Builds a provider whose requests give up after `timeout`.
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e| CompletionError::Config(format!("Invalid upstream URL {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Config(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatible {
    async fn complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<Option<String>, CompletionError> {
        debug!(
            model = request.model,
            messages = request.messages.len(),
            "calling upstream completion API"
        );

        let resp = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(CompletionError::Upstream { status, body });
        }

        let bytes = resp.bytes().await?;
        let data: CompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        Ok(data.first_text())
    }
}
