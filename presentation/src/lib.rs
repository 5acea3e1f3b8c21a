//! Presentation layer for storyloom
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive reply loop.

pub mod cli;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use interactive::StoryRepl;
pub use output::console::StoryFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
