//! Domain layer for storyloom
//!
//! This crate contains the core story logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! A story is told by several agents, each a persona with a fixed
//! instruction prompt and an append-only history:
//!
//! - **world_manager**: writes the story opening and names the cast
//! - **character_maker**: writes the counterpart's backstory
//! - **character agents**: role-play one character, offering A/B/C replies
//!
//! ## Response validation
//!
//! Every response kind has a structural validator that turns free-form
//! text into a verdict plus structured data (cast, dialogue options).

pub mod agent;
pub mod core;
pub mod prompt;
pub mod response;
pub mod session;
pub mod story;

// Re-export commonly used types
pub use agent::{Agent, AgentId, AgentRegistry};
pub use core::{error::DomainError, model::Model};
pub use prompt::StoryPromptTemplate;
pub use response::{Extracted, ResponseKind, ValidationResult};
pub use session::entities::{Message, Role};
pub use story::{Cast, Dialogue, DialogueOptions, PlayerChoice, Stage, StoryOutcome, StoryStage};
