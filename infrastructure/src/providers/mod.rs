//! Completion provider adapters

pub mod openai;

pub use openai::{OpenAiCompletionProvider, OpenAiSettings};
