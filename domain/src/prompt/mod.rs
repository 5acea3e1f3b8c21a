//! Prompt domain
//!
//! Templates for the instruction and user prompts of each story stage.

mod template;

pub use template::StoryPromptTemplate;
