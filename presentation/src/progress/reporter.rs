//! Progress reporting for story generation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use storyloom_application::StoryProgressNotifier;
use storyloom_domain::Stage;

/// Reports progress with one spinner per stage
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn retry_message(attempt: usize, max_attempts: usize, reason: &str) -> String {
        format!("attempt {}/{} failed: {}", attempt, max_attempts, reason)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("working...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_attempt_failed(&self, _stage: Stage, attempt: usize, max_attempts: usize, reason: &str) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::retry_message(attempt, max_attempts, reason).yellow().to_string());
        }
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            let status = if success {
                format!("{} {}", "v".green(), stage.display_name())
            } else {
                format!("{} {} (failed)", "x".red(), stage.display_name())
            };
            pb.set_prefix("");
            pb.finish_with_message(status);
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl StoryProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_attempt_failed(&self, _stage: Stage, attempt: usize, max_attempts: usize, reason: &str) {
        eprintln!(
            "  {} {}",
            "!".yellow(),
            ProgressReporter::retry_message(attempt, max_attempts, reason)
        );
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), stage);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), stage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_message() {
        assert_eq!(
            ProgressReporter::retry_message(2, 3, "Empty response"),
            "attempt 2/3 failed: Empty response"
        );
    }

    #[test]
    fn test_reporter_survives_unbalanced_callbacks() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_complete(Stage::World, true);
        reporter.on_attempt_failed(Stage::World, 1, 3, "Timeout");

        reporter.on_stage_start(Stage::World);
        reporter.on_stage_start(Stage::Dialogue);
        reporter.on_stage_complete(Stage::Dialogue, false);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
