//! Agent value objects.

use serde::{Deserialize, Serialize};

/// Identifier of the coordinator agent that writes the story world.
pub const WORLD_MANAGER: &str = "world_manager";

/// Identifier of the agent that writes character backstories.
pub const CHARACTER_MAKER: &str = "character_maker";

/// Unique identifier of an agent in the registry.
///
/// The two built-in agents use fixed ids; in-story character agents are
/// keyed by the character's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The coordinator agent.
    pub fn world_manager() -> Self {
        Self::new(WORLD_MANAGER)
    }

    /// The backstory writer agent.
    pub fn character_maker() -> Self {
        Self::new(CHARACTER_MAKER)
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for AgentId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
