//! LLM Gateway port
//!
//! Defines the interface for the hosted completion endpoint.

use async_trait::async_trait;
use legalease_domain::{GenerationParameters, Model, StreamAccumulator, StreamEvent, Turn};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

/// Why a completion call did not produce a reply.
///
/// The variants carry detail for logs and error messages. Callers treat
/// them all as one failure kind: none is retried.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A completion call: the request shape the endpoint expects.
///
/// Serializes to `{model, messages: [{role, content}], max_tokens,
/// temperature, top_p, stream?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Turn>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<Turn>, parameters: &GenerationParameters) -> Self {
        Self {
            model,
            messages,
            max_tokens: parameters.max_tokens(),
            temperature: parameters.temperature(),
            top_p: parameters.top_p(),
            stream: false,
        }
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// One generated alternative, in the endpoint's order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionChoice {
    /// `None` when the endpoint sent the choice without a message.
    pub message: Option<Turn>,
    pub finish_reason: Option<String>,
}

/// A non-streaming completion result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
    /// Model that answered, when the endpoint reports it.
    pub model: Option<String>,
}

impl CompletionResponse {
    /// A single-choice assistant response (fallbacks and tests).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![CompletionChoice {
                message: Some(Turn::assistant(text)),
                finish_reason: Some("stop".to_string()),
            }],
            model: None,
        }
    }

    /// Content of the first choice, the only one the chat reads.
    ///
    /// `None` when there are no choices or the first one has no message;
    /// later choices are never consulted.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .map(Turn::content)
    }
}

/// Gateway for the completion endpoint
///
/// This port defines how the application layer communicates with the hosted
/// model. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a request and wait for the complete response.
    async fn complete(&self, request: &CompletionRequest)
    -> Result<CompletionResponse, GatewayError>;

    /// Send a request and receive the reply incrementally.
    ///
    /// Default implementation calls `complete()` and wraps the first choice in
    /// a single `Completed` event, so non-streaming adapters work unchanged.
    async fn complete_streaming(
        &self,
        request: &CompletionRequest,
    ) -> Result<StreamHandle, GatewayError> {
        let response = self.complete(request).await?;
        let text = response
            .first_content()
            .ok_or_else(|| GatewayError::InvalidResponse("response contained no choices".into()))?
            .to_string();
        let (tx, rx) = mpsc::channel(1);
        // Send Completed event: if the receiver is dropped, that's fine
        let _ = tx.send(StreamEvent::Completed(text)).await;
        Ok(StreamHandle::new(rx))
    }

    /// Get available models
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(Model::known_models())
    }
}

/// Handle for receiving streaming events from a completion call.
///
/// Receiving end of a streamed completion.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Drain the stream into the full reply text.
    pub async fn collect_text(self) -> Result<String, GatewayError> {
        self.collect_text_with(|_| {}).await
    }

    /// Consume the stream, calling `on_chunk` for every non-empty fragment in
    /// arrival order, and return the concatenated text.
    pub async fn collect_text_with<F>(mut self, mut on_chunk: F) -> Result<String, GatewayError>
    where
        F: FnMut(&str) + Send,
    {
        let mut accumulator = StreamAccumulator::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    if !chunk.is_empty() {
                        on_chunk(&chunk);
                    }
                    accumulator.push(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if accumulator.fragments() == 0 && !text.is_empty() {
                        on_chunk(&text);
                    }
                    return Ok(accumulator.finish(Some(text)));
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed: return what we have
        Ok(accumulator.finish(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn handle_from(events: Vec<StreamEvent>) -> StreamHandle {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.send(event).await.unwrap();
        }
        StreamHandle::new(rx)
    }

    #[tokio::test]
    async fn collect_concatenates_fragments() {
        let handle = handle_from(vec![
            StreamEvent::Delta("Hel".to_string()),
            StreamEvent::Delta("lo".to_string()),
            StreamEvent::Delta(" there".to_string()),
        ])
        .await;
        assert_eq!(handle.collect_text().await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn collect_reports_each_fragment() {
        let handle = handle_from(vec![
            StreamEvent::Delta("Hel".to_string()),
            StreamEvent::Delta(String::new()),
            StreamEvent::Delta("lo".to_string()),
            StreamEvent::Completed(String::new()),
        ])
        .await;
        let mut seen = Vec::new();
        let text = handle
            .collect_text_with(|chunk| seen.push(chunk.to_string()))
            .await
            .unwrap();
        assert_eq!(text, "Hello");
        assert_eq!(seen, vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn completed_only_matches_non_streaming_text() {
        let handle = handle_from(vec![StreamEvent::Completed("Hello there".to_string())]).await;
        assert_eq!(handle.collect_text().await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn error_event_fails_collection() {
        let handle = handle_from(vec![
            StreamEvent::Delta("partial".to_string()),
            StreamEvent::Error("connection reset".to_string()),
        ])
        .await;
        assert!(matches!(
            handle.collect_text().await,
            Err(GatewayError::RequestFailed(_))
        ));
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = CompletionRequest::new(
            Model::Falcon180BChat,
            vec![Turn::system("sys"), Turn::user("Hello")],
            &GenerationParameters::default(),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "tiiuae/falcon-180B-chat");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hello");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["top_p"], 0.95);
        assert!(json.get("stream").is_none());

        let json = serde_json::to_value(request.with_stream(true)).unwrap();
        assert_eq!(json["stream"], true);
    }

    #[test]
    fn first_content_reads_first_choice() {
        assert_eq!(CompletionResponse::from_text("Hi").first_content(), Some("Hi"));
        assert_eq!(CompletionResponse::default().first_content(), None);
    }

    #[test]
    fn first_content_ignores_later_choices() {
        let response = CompletionResponse {
            choices: vec![
                CompletionChoice {
                    message: None,
                    finish_reason: Some("length".to_string()),
                },
                CompletionChoice {
                    message: Some(Turn::assistant("second")),
                    finish_reason: Some("stop".to_string()),
                },
            ],
            model: None,
        };
        assert_eq!(response.first_content(), None);
    }
}
