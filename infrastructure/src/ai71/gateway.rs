//! AI71 LLM Gateway implementation

use super::error::{Ai71Error, Result};
use super::protocol::{ChatCompletion, error_message};
use super::sse::forward_events;
use crate::config::FileApiConfig;
use async_trait::async_trait;
use futures::StreamExt;
use legalease_application::ports::llm_gateway::{
    CompletionRequest, CompletionResponse, GatewayError, LlmGateway, StreamHandle,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const STREAM_BUFFER: usize = 64;

/// LLM Gateway implementation for the AI71 chat completions API
pub struct Ai71Gateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for Ai71Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ai71Gateway")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Ai71Gateway {
    /// Create a gateway for `base_url` authenticated with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Ai71Error::InvalidConfig("API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Ai71Gateway initialized for {}", base_url);

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Create a gateway from the `[api]` section and a resolved key.
    pub fn from_config(config: &FileApiConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::new(config.base_url.as_str(), api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn post(&self, request: &CompletionRequest) -> Result<reqwest::Response> {
        debug!(
            "POST {} (model: {}, {} message(s), stream: {})",
            self.endpoint(),
            request.model,
            request.messages.len(),
            request.stream
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("AI71 returned HTTP {}", status.as_u16());
        Err(Ai71Error::status(status.as_u16(), &error_message(&body)))
    }
}

#[async_trait]
impl LlmGateway for Ai71Gateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, GatewayError> {
        let request = request.clone().with_stream(false);
        let response = self.post(&request).await?;
        let bytes = response.bytes().await.map_err(Ai71Error::from)?;
        let completion: ChatCompletion =
            serde_json::from_slice(&bytes).map_err(Ai71Error::from)?;

        debug!("AI71 returned {} choice(s)", completion.choices.len());
        Ok(CompletionResponse::from(completion))
    }

    async fn complete_streaming(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let request = request.clone().with_stream(true);
        let response = self.post(&request).await?;

        let byte_stream = response
            .bytes_stream()
            .map(|result| result.map_err(std::io::Error::other));
        let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(forward_events(reader, tx));

        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let gateway = Ai71Gateway::new("https://api.ai71.ai/v1", "ai71-secret").unwrap();
        let debug = format!("{:?}", gateway);
        assert!(!debug.contains("ai71-secret"));
        assert!(debug.contains("api.ai71.ai"));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway = Ai71Gateway::new("http://localhost:9000/v1/", "key").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:9000/v1");
        assert_eq!(gateway.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            Ai71Gateway::new("https://api.ai71.ai/v1", " "),
            Err(Ai71Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = FileApiConfig::default();
        let gateway = Ai71Gateway::from_config(&config, "key").unwrap();
        assert_eq!(gateway.base_url(), "https://api.ai71.ai/v1");
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_gateway_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let gateway = Ai71Gateway::new("http://127.0.0.1:9/v1", "key").unwrap();
        let request = CompletionRequest::new(
            legalease_domain::Model::default(),
            vec![legalease_domain::Turn::user("hi")],
            &legalease_domain::GenerationParameters::default(),
        );
        let result = gateway.complete(&request).await;
        assert!(matches!(
            result,
            Err(GatewayError::ConnectionError(_) | GatewayError::Timeout)
        ));
    }
}
