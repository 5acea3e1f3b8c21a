//! Conversation gateway
//!
//! One request/response round trip with the completion provider on behalf
//! of a named agent. Both sides of the exchange are appended to the agent's
//! history as soon as a reply arrives, before any validation, so a rejected
//! reply stays on record.

use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use std::sync::Arc;
use storyloom_domain::{AgentId, AgentRegistry, Extracted, Model, ResponseKind};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during an exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Agent '{0}' not found")]
    AgentNotFound(AgentId),

    #[error("{} validation failed: {reason}", .kind.label())]
    Validation { kind: ResponseKind, reason: String },

    #[error("Error communicating with the agent: {0}")]
    Transport(#[from] ProviderError),
}

impl ExchangeError {
    /// Short diagnostic used as retry feedback.
    pub fn reason(&self) -> String {
        match self {
            ExchangeError::Validation { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// A completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub response: String,
    pub extracted: Extracted,
}

/// Gateway between agents and the completion provider.
pub struct ConversationGateway<P: CompletionProvider + ?Sized> {
    provider: Arc<P>,
    model: Model,
    logger: Arc<dyn ConversationLogger>,
}

impl<P: CompletionProvider + ?Sized> ConversationGateway<P> {
    pub fn new(provider: Arc<P>, model: Model) -> Self {
        Self {
            provider,
            model,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Send `user_text` to `agent` and return the reply.
    ///
    /// With `expect` set, the reply must pass that kind's validator; a
    /// rejection is reported as [`ExchangeError::Validation`] after the
    /// turn has already been recorded.
    pub async fn exchange(
        &self,
        registry: &mut AgentRegistry,
        agent: &AgentId,
        user_text: &str,
        expect: Option<ResponseKind>,
    ) -> Result<Exchange, ExchangeError> {
        let messages = registry
            .lookup(agent)
            .map_err(|_| ExchangeError::AgentNotFound(agent.clone()))?
            .conversation_with(user_text);

        debug!(
            agent = %agent,
            model = %self.model,
            messages = messages.len(),
            "Sending exchange"
        );

        let response = match self.provider.complete(&self.model, &messages).await {
            Ok(response) => response,
            Err(e) => {
                warn!(agent = %agent, "Completion provider failed: {}", e);
                self.logger.log(ConversationEvent::new(
                    "transport_error",
                    serde_json::json!({
                        "agent": agent.as_str(),
                        "prompt": user_text,
                        "error": e.to_string(),
                    }),
                ));
                return Err(e.into());
            }
        };

        registry
            .lookup_mut(agent)
            .map_err(|_| ExchangeError::AgentNotFound(agent.clone()))?
            .record_exchange(user_text, response.as_str());

        let verdict = expect.map(|kind| (kind, kind.validate(&response)));

        self.logger.log(ConversationEvent::new(
            "exchange",
            serde_json::json!({
                "agent": agent.as_str(),
                "model": self.model.as_str(),
                "prompt": user_text,
                "response": response,
                "expect": expect.map(|kind| kind.as_str()),
                "rejection": verdict.as_ref().and_then(|(_, v)| v.reason()),
            }),
        ));

        let extracted = match verdict {
            None => Extracted::Nothing,
            Some((kind, verdict)) => verdict.into_result().map_err(|reason| {
                debug!(agent = %agent, kind = %kind, "Response rejected: {}", reason);
                ExchangeError::Validation { kind, reason }
            })?,
        };

        Ok(Exchange {
            response,
            extracted,
        })
    }
}
