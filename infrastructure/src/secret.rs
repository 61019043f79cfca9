//! API key resolution.
//!
//! The key comes from `[api].api_key` when set, otherwise from the
//! environment variable named by `[api].api_key_env`. The value is never
//! logged.

use crate::config::FileApiConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretError {
    #[error("API key not found: set the {0} environment variable or [api].api_key")]
    Missing(String),
}

/// Resolve the API key from configuration or the process environment.
pub fn resolve_api_key(config: &FileApiConfig) -> Result<String, SecretError> {
    resolve_with(config, |name| std::env::var(name).ok())
}

fn resolve_with(
    config: &FileApiConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, SecretError> {
    if let Some(key) = config.api_key.as_deref().map(str::trim)
        && !key.is_empty()
    {
        debug!("Using API key from configuration");
        return Ok(key.to_string());
    }

    let var = config.api_key_env.trim();
    match lookup(var).map(|v| v.trim().to_string()) {
        Some(key) if !key.is_empty() => {
            debug!("Using API key from ${}", var);
            Ok(key)
        }
        _ => Err(SecretError::Missing(var.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, "AI71_API_KEY");
            value.map(str::to_string)
        }
    }

    #[test]
    fn test_literal_key_wins() {
        let config = FileApiConfig {
            api_key: Some("from-config".to_string()),
            ..FileApiConfig::default()
        };
        assert_eq!(
            resolve_with(&config, |_| Some("from-env".to_string())).unwrap(),
            "from-config"
        );
    }

    #[test]
    fn test_env_key() {
        let config = FileApiConfig::default();
        assert_eq!(
            resolve_with(&config, env_with(Some("from-env\n"))).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_blank_literal_falls_through_to_env() {
        let config = FileApiConfig {
            api_key: Some("   ".to_string()),
            ..FileApiConfig::default()
        };
        assert_eq!(
            resolve_with(&config, env_with(Some("from-env"))).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_missing_key_names_variable() {
        let config = FileApiConfig::default();
        let err = resolve_with(&config, env_with(None)).unwrap_err();
        assert_eq!(err, SecretError::Missing("AI71_API_KEY".to_string()));
        assert!(err.to_string().contains("AI71_API_KEY"));

        assert!(resolve_with(&config, env_with(Some(""))).is_err());
    }
}
