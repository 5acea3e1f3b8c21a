//! Story entities produced by the pipeline stages.

use super::choice::DialogueOptions;
use serde::{Deserialize, Serialize};

/// The two characters named by the story opening.
///
/// The protagonist is always entry 1 of the character list; the
/// counterpart is entry 2 and gets its own role-playing agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub protagonist: String,
    pub counterpart: String,
}

impl Cast {
    pub fn new(protagonist: impl Into<String>, counterpart: impl Into<String>) -> Self {
        Self {
            protagonist: protagonist.into(),
            counterpart: counterpart.into(),
        }
    }

    /// Names in list order.
    pub fn names(&self) -> [&str; 2] {
        [&self.protagonist, &self.counterpart]
    }
}

/// One step of the story pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    World,
    CharacterBackground,
    CharacterAgent,
    Dialogue,
    Choice,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::World => "world",
            Stage::CharacterBackground => "character_background",
            Stage::CharacterAgent => "character_agent",
            Stage::Dialogue => "dialogue",
            Stage::Choice => "choice",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::World => "Generating story world",
            Stage::CharacterBackground => "Writing character background",
            Stage::CharacterAgent => "Casting character agent",
            Stage::Dialogue => "Opening dialogue",
            Stage::Choice => "Continuing dialogue",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a story run through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStage {
    Idle,
    WorldGenerated,
    CharacterBackgroundGenerated,
    CharacterAgentAdded,
    DialogueGenerated,
    AwaitingChoice,
    Terminated,
}

impl StoryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStage::Idle => "idle",
            StoryStage::WorldGenerated => "world_generated",
            StoryStage::CharacterBackgroundGenerated => "character_background_generated",
            StoryStage::CharacterAgentAdded => "character_agent_added",
            StoryStage::DialogueGenerated => "dialogue_generated",
            StoryStage::AwaitingChoice => "awaiting_choice",
            StoryStage::Terminated => "terminated",
        }
    }

    /// Whether a player choice can be processed in this stage.
    pub fn accepts_choice(&self) -> bool {
        matches!(
            self,
            StoryStage::DialogueGenerated | StoryStage::AwaitingChoice
        )
    }
}

impl std::fmt::Display for StoryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character's dialogue turn.
///
/// `options` is only present when the response carried exactly the
/// A/B/C reply markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub text: String,
    pub options: Option<DialogueOptions>,
}

/// Everything the opening stages produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOutcome {
    pub world_overview: String,
    pub cast: Cast,
    pub character_overview: String,
    pub opening_dialogue: Dialogue,
    pub chats: Vec<String>,
}
