//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Agent '{0}' not found")]
    AgentNotFound(String),

    #[error("Invalid choice '{0}'. Please choose A, B, or C")]
    InvalidChoice(String),
}
