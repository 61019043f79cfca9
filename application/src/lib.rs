//! Application layer for Legal Ease
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ChatConfig, DEFAULT_GREETING};
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    llm_gateway::{
        CompletionChoice, CompletionRequest, CompletionResponse, GatewayError, LlmGateway,
        StreamHandle,
    },
    progress::{ChatProgressNotifier, NoProgress},
};
pub use use_cases::send_message::{SendMessageError, SendMessageUseCase, SendOutcome};
pub use use_cases::session_registry::SessionRegistry;
