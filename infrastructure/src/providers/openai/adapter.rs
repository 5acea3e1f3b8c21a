//! OpenAI-compatible completion provider
//!
//! Stateless: every call POSTs the full conversation to
//! `<base_url>/chat/completions`. Works against OpenAI itself and the many
//! servers that mimic it (DeepSeek, DashScope, vLLM, Ollama, ...).

use super::types::{ChatCompletionRequest, ChatCompletionResponse, error_message};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use storyloom_application::{CompletionProvider, ProviderError};
use storyloom_domain::{Message, Model};
use tracing::debug;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    /// API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token; omitted from requests when `None`
    pub api_key: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// [`CompletionProvider`] backed by an OpenAI-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionProvider {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl OpenAiCompletionProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to build HTTP client: {}", e)))?;

        debug!(base_url = %settings.base_url, "Created OpenAI-compatible provider");
        Ok(Self { settings, client })
    }
}

/// Map a failed request to a provider error.
fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_connect() {
        ProviderError::Connection(err.to_string())
    } else {
        ProviderError::RequestFailed(err.to_string())
    }
}

/// Map a non-success HTTP status to a provider error.
fn map_status(status: StatusCode, body: &str) -> ProviderError {
    let message = error_message(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::Timeout,
        _ => ProviderError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, ProviderError> {
        let url = self.settings.completions_url();
        let request = ChatCompletionRequest::new(model, messages);
        debug!(url = %url, model = %model, messages = messages.len(), "Sending chat completion");

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.settings.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = body.into_text()?;
        debug!(bytes = text.len(), "Chat completion received");
        Ok(text)
    }
}
