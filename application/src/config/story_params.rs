//! Story parameters for use case loop control.
//!
//! [`StoryParams`] groups the static parameters of a story run: which
//! model to ask and how hard to retry. [`RetryPolicy`] is the slice of it
//! the retry controller needs.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyloom_domain::Model;

/// Default attempt budget per stage.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default backoff time unit (attempt `n` waits `2^n` units).
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Bounded retry with exponential backoff on transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, transport and validation failures combined.
    pub max_attempts: usize,
    /// Time unit of the exponential backoff.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
        }
    }

    /// Wait after a transport failure on `attempt` (1-based): `2^attempt` units.
    pub fn backoff_for(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        self.backoff_unit
            .saturating_mul(2u32.saturating_pow(exponent))
    }
}

/// Parameters of a story run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryParams {
    /// Model every agent talks to.
    pub model: Model,
    /// Attempt budget per stage.
    pub max_attempts: usize,
    /// Time unit of the transport-failure backoff.
    pub backoff_unit: Duration,
}

impl Default for StoryParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl StoryParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.backoff_unit)
    }
}
