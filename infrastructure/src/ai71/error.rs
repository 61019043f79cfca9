//! Error types for the AI71 adapter

use legalease_application::GatewayError;
use legalease_domain::core::string::truncate;
use thiserror::Error;

/// Result type alias for AI71 operations
pub type Result<T> = std::result::Result<T, Ai71Error>;

const BODY_EXCERPT_LEN: usize = 300;

/// Errors that can occur when communicating with the AI71 API
#[derive(Error, Debug)]
pub enum Ai71Error {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl Ai71Error {
    /// Build a status error from a non-2xx response body.
    pub fn status(status: u16, body: &str) -> Self {
        Ai71Error::Status {
            status,
            message: truncate(body.trim(), BODY_EXCERPT_LEN),
        }
    }
}

impl From<Ai71Error> for GatewayError {
    fn from(err: Ai71Error) -> Self {
        match err {
            Ai71Error::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            Ai71Error::Transport(e) if e.is_decode() => GatewayError::InvalidResponse(e.to_string()),
            Ai71Error::Transport(e) => GatewayError::ConnectionError(e.to_string()),
            Ai71Error::Serialization(e) => GatewayError::InvalidResponse(e.to_string()),
            Ai71Error::Status { status, message } => match status {
                401 | 403 => GatewayError::AuthenticationFailed(message),
                429 => GatewayError::RateLimited(message),
                _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
            },
            Ai71Error::InvalidConfig(e) => GatewayError::Other(e),
        }
    }
}
