//! OpenAI-compatible chat completions provider

mod adapter;
mod types;

pub use adapter::{OpenAiCompletionProvider, OpenAiSettings};
