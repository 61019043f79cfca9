//! Infrastructure layer for legalease
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the AI71 HTTP gateway, configuration file
//! loading, API key resolution and the JSONL conversation log.

pub mod ai71;
pub mod config;
pub mod logging;
pub mod secret;

// Re-export commonly used types
pub use ai71::{
    error::{Ai71Error, Result},
    gateway::Ai71Gateway,
};
pub use config::{
    ConfigLoader, FileApiConfig, FileChatConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileModelConfig, FileOutputConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use secret::{SecretError, resolve_api_key};
