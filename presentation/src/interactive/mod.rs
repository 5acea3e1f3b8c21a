//! Interactive reply loop

pub mod repl;

pub use repl::{ReplyInput, StoryRepl, parse_reply};
