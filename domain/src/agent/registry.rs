//! In-memory agent registry.
//!
//! One registry lives per story session. Agents can be added at any time
//! (the counterpart character is registered mid-run) but never removed.

use super::entities::Agent;
use super::value_objects::AgentId;
use crate::core::error::DomainError;
use crate::prompt::StoryPromptTemplate;
use std::collections::HashMap;

/// Mapping from agent id to agent record.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentId, Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the world manager and character maker.
    pub fn with_story_agents() -> Self {
        let mut registry = Self::new();
        registry.register(
            AgentId::world_manager(),
            StoryPromptTemplate::world_manager_system(),
        );
        registry.register(
            AgentId::character_maker(),
            StoryPromptTemplate::character_maker_system(),
        );
        registry
    }

    /// Create an agent with an empty history.
    ///
    /// Registering an existing id replaces the agent and resets its history.
    pub fn register(&mut self, id: impl Into<AgentId>, instruction: impl Into<String>) {
        self.agents.insert(id.into(), Agent::new(instruction));
    }

    pub fn lookup(&self, id: &AgentId) -> Result<&Agent, DomainError> {
        self.agents
            .get(id)
            .ok_or_else(|| DomainError::AgentNotFound(id.to_string()))
    }

    pub fn lookup_mut(&mut self, id: &AgentId) -> Result<&mut Agent, DomainError> {
        self.agents
            .get_mut(id)
            .ok_or_else(|| DomainError::AgentNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&AgentId> {
        let mut ids: Vec<&AgentId> = self.agents.keys().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_agents_are_seeded() {
        let registry = AgentRegistry::with_story_agents();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&AgentId::world_manager()));
        assert!(registry.contains(&AgentId::character_maker()));
        assert!(
            registry
                .lookup(&AgentId::world_manager())
                .unwrap()
                .instruction()
                .contains("Character List:")
        );
    }

    #[test]
    fn test_lookup_missing_agent() {
        let registry = AgentRegistry::new();
        let err = registry.lookup(&AgentId::new("Nobody")).unwrap_err();
        assert_eq!(err, DomainError::AgentNotFound("Nobody".to_string()));
    }

    #[test]
    fn test_reregistration_resets_history() {
        let mut registry = AgentRegistry::new();
        registry.register("Qinghe", "first");
        registry
            .lookup_mut(&AgentId::new("Qinghe"))
            .unwrap()
            .record_exchange("hi", "hello");

        registry.register("Qinghe", "second");

        let agent = registry.lookup(&AgentId::new("Qinghe")).unwrap();
        assert_eq!(agent.instruction(), "second");
        assert!(agent.history().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_sorted() {
        let mut registry = AgentRegistry::with_story_agents();
        registry.register("Ami", "You play Ami.");
        let ids: Vec<&str> = registry.ids().into_iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["Ami", "character_maker", "world_manager"]);
    }
}
