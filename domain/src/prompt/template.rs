//! Prompt templates for the story pipeline

use crate::story::Cast;

/// Templates for generating prompts at each stage
pub struct StoryPromptTemplate;

impl StoryPromptTemplate {
    /// Instruction prompt for the world manager agent
    pub fn world_manager_system() -> &'static str {
        r#"You are a story constructor. You will write a story based on some keywords, including as many details as possible. The story's beginning should end with at least two characters appearing, with one of them being the protagonist. End with the scene of their meeting.

Output the character names at the end in the following format, with the first character always being the protagonist, for example:
Character List:
1. Ami
2. Qinghe"#
    }

    /// Instruction prompt for the character maker agent
    pub fn character_maker_system() -> &'static str {
        "You are a character creator. Based on the input provided, you will craft a concise character backstory."
    }

    /// Instruction prompt for an in-story character agent
    pub fn character_agent_system(name: &str) -> String {
        format!(
            "You will play the specified character '{}' based on the received information.",
            name
        )
    }

    /// User prompt asking the world manager for a story opening
    pub fn world_beginning(theme: &str) -> String {
        format!(
            "Please help me write a story beginning with the theme of '{} Story'",
            theme
        )
    }

    /// User prompt asking the character maker for a backstory
    pub fn character_background(world_overview: &str, name: &str) -> String {
        format!(
            "{}\n\nHelp me write a Background and Personality for {}",
            world_overview, name
        )
    }

    /// User prompt opening the role-played dialogue with three reply options
    pub fn dialogue(world_overview: &str, character_overview: &str, cast: &Cast) -> String {
        format!(
            r#"{}{}

Now you will play a dialogue between {} and {}, your task is to develop the story through questions and answers.

'Focus on storytelling' by using specific expressions to drive the story forward.
The protagonist and you will take turns speaking. Provide responses and 3 possible replies strictly formatted as follows:

A. **"First option text here"**
B. **"Second option text here"**
C. **"Third option text here"**

These options should genuinely change the story's direction and be labeled as shown above.I will tell you which answer the protagonist chooses."#,
            world_overview, character_overview, cast.counterpart, cast.protagonist
        )
    }

    /// Append failure feedback to a prompt for the next attempt
    pub fn retry_feedback(prompt: &str, reason: &str) -> String {
        format!(
            "{}\n\nThe previous response was invalid because: {}. Please try again and ensure your response includes all required elements.",
            prompt, reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_beginning_contains_theme() {
        let prompt = StoryPromptTemplate::world_beginning("Town Suspense");
        assert!(prompt.contains("'Town Suspense Story'"));
    }

    #[test]
    fn test_background_prompt_appends_request() {
        let prompt = StoryPromptTemplate::character_background("The world.", "Qinghe");
        assert!(prompt.starts_with("The world."));
        assert!(prompt.ends_with("Background and Personality for Qinghe"));
    }

    #[test]
    fn test_dialogue_prompt_names_both_characters() {
        let cast = Cast::new("Ami", "Qinghe");
        let prompt = StoryPromptTemplate::dialogue("World. ", "Backstory.", &cast);
        assert!(prompt.contains("dialogue between Qinghe and Ami"));
        assert!(prompt.contains("A. **\"First option text here\"**"));
        assert!(prompt.contains("C. **\"Third option text here\"**"));
    }

    #[test]
    fn test_retry_feedback_keeps_prompt_and_reason() {
        let prompt = StoryPromptTemplate::retry_feedback("A", "Empty response");
        assert!(prompt.starts_with("A\n\n"));
        assert!(prompt.contains("invalid because: Empty response."));
    }
}
