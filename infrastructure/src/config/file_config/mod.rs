//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod chat;
mod generation;
mod logging;
mod model;
mod output;
mod repl;

pub use api::FileApiConfig;
pub use chat::FileChatConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use legalease_application::ChatConfig;
use legalease_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint and credentials
    pub api: FileApiConfig,
    /// Model selection
    pub model: FileModelConfig,
    /// Default generation parameters
    pub generation: FileGenerationConfig,
    /// History policy and greeting
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Request timeout and endpoint
    /// 2. Model name
    /// 3. Generation parameters (range, and choices when constrained)
    /// 4. History mode and window
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.api.validate());
        issues.extend(self.model.validate());
        issues.extend(self.generation.to_parameters().1);
        issues.extend(self.chat.parse_history_mode().1);
        issues.extend(self.chat.validate_window());

        issues
    }

    /// Build the chat configuration, falling back to defaults for any
    /// field [`validate`](Self::validate) reported.
    pub fn to_chat_config(&self) -> ChatConfig {
        let defaults = ChatConfig::default();
        let (parameters, _) = self.generation.to_parameters();
        let (history_mode, _) = self.chat.parse_history_mode();

        ChatConfig {
            model: self.model.name.clone(),
            history_mode,
            history_window: self.chat.history_window(),
            system_instruction: self.chat.system_instruction(),
            stream: self.chat.stream,
            greeting: self.chat.greeting.clone().unwrap_or(defaults.greeting),
            parameters,
            constraint: self.generation.constraint(),
            timeout: self.api.timeout_seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}
