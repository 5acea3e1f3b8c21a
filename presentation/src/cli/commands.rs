//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the generated story
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted story text
    Story,
    /// The story outcome as JSON
    Json,
}

/// CLI arguments for storyloom
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(author, version, about = "Interactive fiction woven by cooperating LLM agents")]
#[command(long_about = r#"
Storyloom tells a branching story with a small cast of LLM agents.

The story unfolds in stages:
1. World: a world manager writes the opening and names two characters
2. Background: a character maker writes the counterpart's backstory
3. Dialogue: the counterpart speaks and offers three replies (A, B, C)
4. Choice: your reply is fed back and the dialogue continues

Configuration files are loaded from (in priority order):
1. STORYLOOM_* environment variables
2. --config <path>       Explicit config file
3. ./storyloom.toml      Project-level config
4. ~/.config/storyloom/config.toml   Global config

Example:
  storyloom "Town Suspense"
  storyloom "Haunted Lighthouse" --choice A --choice C
  storyloom -m gpt-4o-mini --interactive
"#)]
pub struct Cli {
    /// Story theme (defaults to story.theme from the config)
    pub theme: Option<String>,

    /// Replies to play after the opening dialogue, in order (A, B or C)
    #[arg(short, long, value_name = "CHOICE")]
    pub choice: Vec<String>,

    /// Prompt for replies until you quit
    #[arg(short, long)]
    pub interactive: bool,

    /// Model every agent talks to
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Attempts per stage before giving up
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "story")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Record every agent exchange to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scripted_choices() {
        let cli = Cli::parse_from([
            "storyloom",
            "Haunted Lighthouse",
            "--choice",
            "A",
            "-c",
            "C",
            "-vv",
        ]);
        assert_eq!(cli.theme.as_deref(), Some("Haunted Lighthouse"));
        assert_eq!(cli.choice, vec!["A", "C"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.interactive);
        assert_eq!(cli.output, OutputFormat::Story);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "storyloom",
            "-m",
            "gpt-4o-mini",
            "--max-attempts",
            "5",
            "--interactive",
            "--output",
            "json",
            "--no-config",
        ]);
        assert!(cli.theme.is_none());
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.max_attempts, Some(5));
        assert!(cli.interactive);
        assert!(cli.no_config);
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
