//! Send Message use case.
//!
//! Runs one user submission through the chat chain:
//!
//! ```text
//! input ─▶ Session Store (user turn) ─▶ RequestBuilder ─▶ LlmGateway
//!       ─▶ normalize_response ─▶ Session Store (assistant turn)
//! ```
//!
//! The session moves `Idle → AwaitingResponse → Idle`. A failed call is
//! never retried; the user turn stays recorded and no assistant turn is
//! appended.

use crate::config::ChatConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::ChatProgressNotifier;
use legalease_domain::core::string::truncate;
use legalease_domain::{ChatSession, DomainError, Model, Turn, normalize_response};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while sending a message.
#[derive(Error, Debug)]
pub enum SendMessageError {
    /// Any failure of the completion call: transport, authentication,
    /// malformed request, quota or an unusable response.
    #[error("{0}")]
    CompletionRequestFailure(#[from] GatewayError),

    #[error(transparent)]
    Session(#[from] DomainError),
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input: nothing was sent and the session is unchanged.
    Ignored,
    /// The normalized assistant turn that was appended.
    Replied(Turn),
}

impl SendOutcome {
    pub fn reply(&self) -> Option<&Turn> {
        match self {
            SendOutcome::Replied(turn) => Some(turn),
            SendOutcome::Ignored => None,
        }
    }
}

/// Use case for sending one user message and recording the reply.
#[derive(Clone)]
pub struct SendMessageUseCase {
    gateway: Arc<dyn LlmGateway>,
    config: ChatConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: ChatConfig) -> Self {
        Self {
            gateway,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Models the completion endpoint can serve.
    pub async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        self.gateway.available_models().await
    }

    /// Submit `input` on behalf of `session`.
    pub async fn execute(
        &self,
        session: &mut ChatSession,
        input: &str,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<SendOutcome, SendMessageError> {
        if input.trim().is_empty() {
            debug!("Ignoring blank input for session {}", session.id());
            return Ok(SendOutcome::Ignored);
        }

        session.begin_request()?;

        // History is everything before the new turn
        let history_len = session.conversation().history().len();
        session.append(Turn::user(input));
        let messages = self
            .config
            .request_builder()
            .build(&session.conversation().history()[..history_len], input);

        info!(
            "Session {}: sending {} message(s) ({} history) for: {}",
            session.id(),
            messages.len(),
            self.config.history_mode,
            truncate(input, 80)
        );

        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::UserMessage,
            serde_json::json!({
                "session": session.id().as_str(),
                "text": input,
                "history_mode": self.config.history_mode.as_str(),
                "request_messages": messages.len(),
            }),
        ));

        let request = CompletionRequest::new(self.config.model.clone(), messages, session.parameters())
            .with_stream(self.config.stream);

        progress.on_request_start(&request.model, request.messages.len());
        let result = self.call(&request, progress).await;
        session.finish_request();

        match result {
            Ok(raw) => {
                progress.on_request_end(true);
                let reply = normalize_response(&raw);
                if reply.len() != raw.len() {
                    debug!("Stripped turn marker from reply ({} -> {} bytes)", raw.len(), reply.len());
                }

                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEventKind::AssistantMessage,
                    serde_json::json!({
                        "session": session.id().as_str(),
                        "model": request.model.to_string(),
                        "bytes": reply.len(),
                        "text": reply,
                    }),
                ));

                let turn = Turn::assistant(reply);
                session.append(turn.clone());
                info!("Session {}: reply recorded", session.id());
                Ok(SendOutcome::Replied(turn))
            }
            Err(e) => {
                progress.on_request_end(false);
                warn!("Session {}: completion request failed: {}", session.id(), e);

                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEventKind::CompletionFailed,
                    serde_json::json!({
                        "session": session.id().as_str(),
                        "model": request.model.to_string(),
                        "error": e.to_string(),
                    }),
                ));

                Err(SendMessageError::CompletionRequestFailure(e))
            }
        }
    }

    async fn call(
        &self,
        request: &CompletionRequest,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<String, GatewayError> {
        let call = async {
            if request.stream {
                let handle = self.gateway.complete_streaming(request).await?;
                handle.collect_text_with(|chunk| progress.on_chunk(chunk)).await
            } else {
                let response = self.gateway.complete(request).await?;
                response
                    .first_content()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        GatewayError::InvalidResponse("response contained no choices".to_string())
                    })
            }
        };

        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => call.await,
        }
    }
}
