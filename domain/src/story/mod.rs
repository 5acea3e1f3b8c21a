//! Story domain: cast, dialogue, player choices and pipeline stages.

pub mod choice;
pub mod entities;

pub use choice::{DialogueOptions, PlayerChoice};
pub use entities::{Cast, Dialogue, Stage, StoryOutcome, StoryStage};
