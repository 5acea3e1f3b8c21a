//! Progress notification port
//!
//! Defines the interface for reporting progress while a story is generated.

use storyloom_domain::Stage;

/// Callback for progress updates during a story run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain text, etc.)
pub trait StoryProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when one attempt within a stage fails and may be retried
    fn on_attempt_failed(&self, stage: Stage, attempt: usize, max_attempts: usize, reason: &str);

    /// Called when a stage finishes, successfully or not
    fn on_stage_complete(&self, stage: Stage, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl StoryProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_attempt_failed(&self, _stage: Stage, _attempt: usize, _max: usize, _reason: &str) {}
    fn on_stage_complete(&self, _stage: Stage, _success: bool) {}
}
