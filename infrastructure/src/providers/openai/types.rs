//! Wire types for the OpenAI-compatible chat completions API
//!
//! Only the fields the story pipeline reads are modelled; everything else in
//! the response body is ignored.

use serde::{Deserialize, Serialize};
use storyloom_application::ProviderError;
use storyloom_domain::{Message, Model};

// ─── Domain → Wire ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for ChatMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(model: &'a Model, messages: &'a [Message]) -> Self {
        Self {
            model: model.as_str(),
            messages: messages.iter().map(ChatMessage::from).collect(),
        }
    }
}

// ─── Wire → Domain ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice.
    pub fn into_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("Response contained no choices".into()))?
            .message
            .content
            .ok_or_else(|| ProviderError::InvalidResponse("First choice has no content".into()))
    }
}

/// Error body returned by most OpenAI-compatible servers.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Best-effort error message from a failed response body.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
