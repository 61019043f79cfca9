//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("{field} = {value} is not one of the allowed choices ({allowed})")]
    ParameterNotAllowed {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Unknown generation parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown history mode: {0} (expected none, flat or paired)")]
    UnknownHistoryMode(String),

    #[error("A request is already in flight for this session")]
    SessionBusy,
}

impl DomainError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by parameter validation
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidParameter { .. }
                | DomainError::ParameterNotAllowed { .. }
                | DomainError::UnknownParameter(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let error = DomainError::invalid("top_p", "must be within [0, 1]");
        assert_eq!(error.to_string(), "Invalid value for top_p: must be within [0, 1]");
    }

    #[test]
    fn test_is_parameter_error() {
        assert!(DomainError::invalid("max_tokens", "zero").is_parameter_error());
        assert!(DomainError::UnknownParameter("seed".to_string()).is_parameter_error());
        assert!(!DomainError::SessionBusy.is_parameter_error());
        assert!(!DomainError::UnknownHistoryMode("all".to_string()).is_parameter_error());
    }
}
