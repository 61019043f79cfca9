//! AI71 wire types.
//!
//! The request body is [`CompletionRequest`](legalease_application::CompletionRequest)
//! serialized as-is. Responses follow the OpenAI-compatible chat completion
//! shape; unknown fields are ignored and missing ones default.

use legalease_application::{CompletionChoice, CompletionResponse};
use legalease_domain::Turn;
use serde::Deserialize;

/// Non-streaming response body.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One `data:` payload of a streaming response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl From<ChatCompletion> for CompletionResponse {
    fn from(completion: ChatCompletion) -> Self {
        // Positions are kept so choices[0] stays the endpoint's first choice
        let choices = completion
            .choices
            .into_iter()
            .map(|choice| CompletionChoice {
                message: choice
                    .message
                    .map(|message| Turn::assistant(message.content.unwrap_or_default())),
                finish_reason: choice.finish_reason,
            })
            .collect();

        CompletionResponse {
            choices,
            model: completion.model,
        }
    }
}

impl ChatCompletionChunk {
    /// Text carried by the first choice's delta, if any.
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Parse one streaming payload and return its text fragment.
pub fn parse_chunk(data: &str) -> Result<Option<String>, serde_json::Error> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data)?;
    Ok(chunk.delta_text().map(str::to_string))
}

/// The human-readable message of an error body, or the body itself.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_into_response() {
        let json = r#"{
            "id": "cmpl-1",
            "model": "tiiuae/falcon-180B-chat",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Consult the lease."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4}
        }"#;
        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        let response = CompletionResponse::from(completion);
        assert_eq!(response.first_content(), Some("Consult the lease."));
        assert_eq!(response.model.as_deref(), Some("tiiuae/falcon-180B-chat"));
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_empty_choices() {
        let completion: ChatCompletion = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(CompletionResponse::from(completion).first_content().is_none());

        let completion: ChatCompletion = serde_json::from_str(r#"{"choices": [{}]}"#).unwrap();
        let response = CompletionResponse::from(completion);
        assert_eq!(response.choices.len(), 1);
        assert!(response.first_content().is_none());
    }

    #[test]
    fn test_first_choice_without_message_is_not_skipped() {
        let json = r#"{"choices": [
            {"finish_reason": "length"},
            {"message": {"content": "second choice"}}
        ]}"#;
        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        let response = CompletionResponse::from(completion);

        assert_eq!(response.choices.len(), 2);
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("length"));
        assert!(response.first_content().is_none());
    }

    #[test]
    fn test_null_content_is_empty_text() {
        let completion: ChatCompletion =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(CompletionResponse::from(completion).first_content(), Some(""));
    }

    #[test]
    fn test_parse_chunk() {
        let data = r#"{"choices":[{"index":0,"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        assert_eq!(parse_chunk(data).unwrap().as_deref(), Some("Hel"));

        let role_only = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_chunk(role_only).unwrap(), None);

        assert!(parse_chunk("not json").is_err());
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        assert_eq!(error_message(body), "Invalid API key");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
