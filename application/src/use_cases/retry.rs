//! Retry controller
//!
//! Drives repeated exchanges with one agent until a reply passes its
//! validator or the attempt budget runs out.
//!
//! | Failure | Next attempt |
//! |---------|--------------|
//! | transport (provider error) | after `2^attempt` backoff units, same prompt |
//! | validation (malformed reply) | immediately, prompt extended with the reason |
//!
//! Both kinds draw from the same budget. Every attempt is a full gateway
//! exchange, so failed replies remain in the agent's history.

use super::exchange::{ConversationGateway, ExchangeError};
use crate::config::RetryPolicy;
use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use storyloom_domain::{
    AgentId, AgentRegistry, DomainError, Extracted, ResponseKind, StoryPromptTemplate,
};
use tracing::{debug, info, warn};

/// Result of a retried exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A reply passed validation on attempt `attempts`
    Success {
        response: String,
        extracted: Extracted,
        attempts: usize,
    },
    /// The budget ran out; the last failure was a rejected reply
    ExhaustedRetries { attempts: usize, last_reason: String },
    /// The budget ran out; the last failure was a provider error
    TransportError { attempts: usize, cause: ProviderError },
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }

    /// Diagnostic for a failed outcome.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            AttemptOutcome::Success { .. } => None,
            AttemptOutcome::ExhaustedRetries {
                attempts,
                last_reason,
            } => Some(format!(
                "Failed to get valid response after {} attempts. Last error: {}",
                attempts, last_reason
            )),
            AttemptOutcome::TransportError { attempts, cause } => Some(format!(
                "Failed to get valid response after {} attempts. Last error: Error communicating with the agent: {}",
                attempts, cause
            )),
        }
    }
}

/// Last failure seen by a retry session.
enum Failure {
    Validation(String),
    Transport(ProviderError),
}

/// Transient state of one retried exchange.
struct RetrySession {
    attempt: usize,
    max_attempts: usize,
    prompt: String,
    last_failure: Option<Failure>,
}

impl RetrySession {
    fn new(initial_prompt: &str, max_attempts: usize) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            prompt: initial_prompt.to_string(),
            last_failure: None,
        }
    }

    /// Advance to the next attempt, if any remain.
    fn next_attempt(&mut self) -> Option<usize> {
        (self.attempt < self.max_attempts).then(|| {
            self.attempt += 1;
            self.attempt
        })
    }

    fn is_last_attempt(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    fn reject(&mut self, reason: String) {
        self.prompt = StoryPromptTemplate::retry_feedback(&self.prompt, &reason);
        self.last_failure = Some(Failure::Validation(reason));
    }

    fn into_outcome(self) -> AttemptOutcome {
        match self.last_failure {
            Some(Failure::Transport(cause)) => AttemptOutcome::TransportError {
                attempts: self.attempt,
                cause,
            },
            Some(Failure::Validation(last_reason)) => AttemptOutcome::ExhaustedRetries {
                attempts: self.attempt,
                last_reason,
            },
            None => AttemptOutcome::ExhaustedRetries {
                attempts: self.attempt,
                last_reason: "No attempts were made".to_string(),
            },
        }
    }
}

/// Bounded retry over the conversation gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryController {
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Exchange with `agent` until a reply satisfies `expect`.
    ///
    /// Without an expected kind, any non-blank reply is accepted. Fails
    /// fast with [`DomainError::AgentNotFound`] before contacting the
    /// provider when the agent is unknown.
    pub async fn attempt_with_retry<P: CompletionProvider + ?Sized>(
        &self,
        gateway: &ConversationGateway<P>,
        registry: &mut AgentRegistry,
        agent: &AgentId,
        initial_prompt: &str,
        expect: Option<ResponseKind>,
    ) -> Result<AttemptOutcome, DomainError> {
        self.attempt_with_retry_observed(
            gateway,
            registry,
            agent,
            initial_prompt,
            expect,
            |_, _| {},
        )
        .await
    }

    /// Same as [`attempt_with_retry`](Self::attempt_with_retry), calling
    /// `on_failure(attempt, reason)` after every failed attempt.
    pub async fn attempt_with_retry_observed<P, F>(
        &self,
        gateway: &ConversationGateway<P>,
        registry: &mut AgentRegistry,
        agent: &AgentId,
        initial_prompt: &str,
        expect: Option<ResponseKind>,
        on_failure: F,
    ) -> Result<AttemptOutcome, DomainError>
    where
        P: CompletionProvider + ?Sized,
        F: Fn(usize, &str),
    {
        registry.lookup(agent)?;

        let mut session = RetrySession::new(initial_prompt, self.policy.max_attempts);

        while let Some(attempt) = session.next_attempt() {
            debug!(agent = %agent, attempt, "Retry controller attempt");

            let response = match gateway
                .exchange(registry, agent, &session.prompt, None)
                .await
            {
                Ok(exchange) => exchange.response,
                Err(ExchangeError::Transport(cause)) => {
                    warn!(
                        agent = %agent,
                        "Attempt {}/{} failed: {}",
                        attempt, session.max_attempts, cause
                    );
                    on_failure(attempt, &cause.to_string());
                    session.last_failure = Some(Failure::Transport(cause));
                    if !session.is_last_attempt() {
                        tokio::time::sleep(self.policy.backoff_for(attempt)).await;
                    }
                    continue;
                }
                Err(ExchangeError::AgentNotFound(id)) => {
                    return Err(DomainError::AgentNotFound(id.to_string()));
                }
                Err(e @ ExchangeError::Validation { .. }) => {
                    on_failure(attempt, &e.reason());
                    session.reject(e.reason());
                    continue;
                }
            };

            let verdict = match expect {
                Some(kind) => kind.validate(&response).into_result(),
                None if response.trim().is_empty() => Err("Empty response".to_string()),
                None => Ok(Extracted::Nothing),
            };

            match verdict {
                Ok(extracted) => {
                    info!(agent = %agent, attempt, "Valid response obtained");
                    return Ok(AttemptOutcome::Success {
                        response,
                        extracted,
                        attempts: attempt,
                    });
                }
                Err(reason) => {
                    warn!(
                        agent = %agent,
                        "Attempt {}/{} rejected: {}",
                        attempt, session.max_attempts, reason
                    );
                    on_failure(attempt, &reason);
                    session.reject(reason);
                }
            }
        }

        Ok(session.into_outcome())
    }
}
