//! Completion provider port
//!
//! Defines the interface for requesting text from a generative backend.

use async_trait::async_trait;
use storyloom_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur while talking to a completion provider.
///
/// The use cases treat every variant as a transport failure; the variants
/// only exist so diagnostics can say what went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Generative text backend
///
/// Receives the full ordered conversation (instruction, history, new user
/// turn) and returns the assistant's reply. Implementations (adapters)
/// live in the infrastructure layer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, ProviderError>;
}

