//! Application-level configuration.
//!
//! [`ChatConfig`] controls how the send-message use case assembles requests
//! and talks to the completion endpoint.

mod chat_config;

pub use chat_config::{ChatConfig, DEFAULT_GREETING};
