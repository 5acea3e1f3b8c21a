//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! the accessor methods.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storyloom_application::StoryParams;
use storyloom_domain::Model;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("story.max_attempts must be at least 1")]
    InvalidMaxAttempts,
}

/// Raw provider configuration from TOML (`[provider]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Root of the OpenAI-compatible API
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
            model: Model::default().to_string(),
            api_key_env: "DASHSCOPE_API_KEY".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl FileProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// API key read from `api_key_env`, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Raw story configuration from TOML (`[story]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoryConfig {
    /// Theme used when none is given on the command line
    pub theme: String,
    /// Attempt budget per stage
    pub max_attempts: usize,
    /// Backoff unit for transport failures, in milliseconds
    pub backoff_unit_ms: u64,
}

impl Default for FileStoryConfig {
    fn default() -> Self {
        Self {
            theme: "Town Suspense".to_string(),
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// JSONL file receiving every agent exchange
    pub conversation_log: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            conversation_log: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion provider settings
    pub provider: FileProviderConfig,
    /// Story run settings
    pub story: FileStoryConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.story.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }

        Ok(())
    }

    /// Story parameters described by this configuration.
    pub fn story_params(&self) -> StoryParams {
        StoryParams::default()
            .with_model(Model::from(self.provider.model.trim()))
            .with_max_attempts(self.story.max_attempts)
            .with_backoff_unit(Duration::from_millis(self.story.backoff_unit_ms))
    }
}
