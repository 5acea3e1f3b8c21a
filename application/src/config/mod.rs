//! Application-level configuration.
//!
//! - [`StoryParams`]: model selection and attempt budget for a story run
//! - [`RetryPolicy`]: attempt bound and backoff unit for the retry controller

pub mod story_params;

pub use story_params::{DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_ATTEMPTS, RetryPolicy, StoryParams};
