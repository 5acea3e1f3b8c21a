//! Application layer for storyloom
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.
//!
//! # Flow
//!
//! ```text
//! RunStoryUseCase ─▶ RetryController ─▶ ConversationGateway ─▶ CompletionProvider (port)
//! ```

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetryPolicy, StoryParams};
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, StoryProgressNotifier},
};
pub use use_cases::exchange::{ConversationGateway, Exchange, ExchangeError};
pub use use_cases::retry::{AttemptOutcome, RetryController};
pub use use_cases::run_story::{RunStoryUseCase, StoryError, StorySession};
