//! Response kinds: which format contract a response must satisfy.

use super::parsing::{
    validate_character_background, validate_character_dialogue, validate_story_continuation,
    validate_world_init,
};
use super::validation::ValidationResult;
use serde::{Deserialize, Serialize};

/// The format contract expected from an agent's reply.
///
/// Callers pass the kind explicitly with every request that needs
/// validation; nothing is inferred from the prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Story opening followed by a numbered character list
    WorldInit,
    /// Backstory with Background and Personality sections
    CharacterBackground,
    /// Dialogue ending in exactly the options A, B and C
    CharacterDialogue,
    /// Further narrative with dialogue and a refreshed character list
    StoryContinuation,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::WorldInit => "world_init",
            ResponseKind::CharacterBackground => "character_background",
            ResponseKind::CharacterDialogue => "character_dialogue",
            ResponseKind::StoryContinuation => "story_continuation",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ResponseKind::WorldInit => "World manager response",
            ResponseKind::CharacterBackground => "Character background",
            ResponseKind::CharacterDialogue => "Dialogue options",
            ResponseKind::StoryContinuation => "Story continuation",
        }
    }

    /// Run this kind's validator over `response`.
    pub fn validate(&self, response: &str) -> ValidationResult {
        match self {
            ResponseKind::WorldInit => validate_world_init(response),
            ResponseKind::CharacterBackground => validate_character_background(response),
            ResponseKind::CharacterDialogue => validate_character_dialogue(response),
            ResponseKind::StoryContinuation => validate_story_continuation(response),
        }
    }
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_rejects_short_responses() {
        for kind in [
            ResponseKind::WorldInit,
            ResponseKind::CharacterBackground,
            ResponseKind::CharacterDialogue,
            ResponseKind::StoryContinuation,
        ] {
            assert!(!kind.validate("too short").is_valid(), "{kind}");
        }
    }
}
