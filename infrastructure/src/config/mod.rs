//! Configuration file loading for storyloom
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `STORYLOOM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./storyloom.toml` or `./.storyloom.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/storyloom/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileOutputConfig, FileProviderConfig, FileStoryConfig,
};
pub use loader::ConfigLoader;
