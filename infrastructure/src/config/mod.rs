//! Configuration file loading for legalease
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LEGALEASE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./legalease.toml` or `./.legalease.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/legalease/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    FileApiConfig, FileChatConfig, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileModelConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
