//! Port for the structured conversation log.
//!
//! Separate from `tracing` diagnostics: this records what was said and what
//! failed, in a machine-readable form (one JSON record per event).

use serde_json::Value;

/// What happened in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEventKind {
    UserMessage,
    AssistantMessage,
    CompletionFailed,
}

impl ConversationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::UserMessage => "user_message",
            ConversationEventKind::AssistantMessage => "assistant_message",
            ConversationEventKind::CompletionFailed => "completion_failed",
        }
    }
}

/// A conversation event and its event-specific fields.
///
/// The writer adds the timestamp.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: ConversationEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for conversation events.
///
/// `log` never fails: a broken log must not interrupt a chat.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
