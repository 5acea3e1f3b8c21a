//! Console output formatter for generated stories

use colored::Colorize;
use storyloom_domain::{Dialogue, StoryOutcome};

/// Formats story output for console display
pub struct StoryFormatter;

impl StoryFormatter {
    /// Force colors on or off for everything this crate prints
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the opening stages of a story
    pub fn format_outcome(outcome: &StoryOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Storyloom"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} and {}\n",
            "Cast:".cyan().bold(),
            outcome.cast.protagonist,
            outcome.cast.counterpart
        ));

        output.push_str(&Self::section_header("The World"));
        output.push_str(&format!("\n{}\n", outcome.world_overview.trim()));

        output.push_str(&Self::section_header(&format!(
            "Who is {}?",
            outcome.cast.counterpart
        )));
        output.push_str(&format!("\n{}\n", outcome.character_overview.trim()));

        output.push_str(&Self::section_header("The conversation is as follows"));
        output.push_str(&Self::format_dialogue(
            &outcome.cast.counterpart,
            &outcome.opening_dialogue,
        ));

        output
    }

    /// Format one dialogue turn, with the reply menu when options were found
    pub fn format_dialogue(speaker: &str, dialogue: &Dialogue) -> String {
        let mut output = format!(
            "\n{}\n{}\n",
            format!("── {} ──", speaker).yellow().bold(),
            dialogue.text.trim()
        );

        match &dialogue.options {
            Some(options) => {
                output.push_str(&format!("\n{}\n", "Your replies:".cyan().bold()));
                for (choice, text) in options.iter() {
                    output.push_str(&format!("  {} {}\n", format!("[{}]", choice).bold(), text));
                }
            }
            None => {
                output.push_str(&format!(
                    "\n{}\n",
                    "(no reply options were offered; any of A, B or C may still be sent)".dimmed()
                ));
            }
        }

        output
    }

    /// Format a continuation produced by a player choice
    pub fn format_continuation(speaker: &str, dialogue: &Dialogue) -> String {
        format!(
            "{}{}",
            Self::section_header("The conversation continues"),
            Self::format_dialogue(speaker, dialogue)
        )
    }

    /// Format as JSON
    pub fn format_json(outcome: &StoryOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
