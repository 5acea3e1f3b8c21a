//! Agent domain module
//!
//! Named personas, each with a fixed instruction prompt and an append-only
//! conversation history, plus the registry that owns them.

pub mod entities;
pub mod registry;
pub mod value_objects;

pub use entities::Agent;
pub use registry::AgentRegistry;
pub use value_objects::{AgentId, CHARACTER_MAKER, WORLD_MANAGER};
