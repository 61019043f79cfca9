//! API configuration from TOML (`[api]` section)

use legalease_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Default AI71 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ai71.ai/v1";

/// Environment variable read for the API key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "AI71_API_KEY";

/// Raw API configuration from TOML
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Name of the environment variable holding the key
    pub api_key_env: String,
    /// Literal key (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    pub base_url: String,
    /// Request timeout in seconds (unset = no limit)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl std::fmt::Debug for FileApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileApiConfig")
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl FileApiConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::error("api.timeout_seconds", "cannot be 0"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                "api.base_url",
                format!("'{}' is not an http(s) URL", self.base_url),
            ));
        }
        if self.api_key.is_none() && self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "api.api_key_env",
                "empty; no API key can be resolved",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileApiConfig::default();
        assert_eq!(config.api_key_env, "AI71_API_KEY");
        assert_eq!(config.base_url, "https://api.ai71.ai/v1");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = FileApiConfig {
            api_key: Some("ai71-secret-value".to_string()),
            ..FileApiConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ai71-secret-value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FileApiConfig {
            timeout_seconds: Some(0),
            ..FileApiConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let config = FileApiConfig {
            base_url: "api.ai71.ai".to_string(),
            ..FileApiConfig::default()
        };
        assert_eq!(config.validate()[0].field, "api.base_url");
    }
}
