//! Configuration validation issues.
//!
//! Configuration sources report problems as structured [`ConfigIssue`]s
//! instead of failing on the first one, so every issue can be shown at once.
//!
//! # Examples
//!
//! ```
//! use legalease_domain::config::validation::{ConfigIssue, Severity};
//!
//! let issue = ConfigIssue::error("generation.top_p", "must be within [0, 1]");
//! assert!(issue.is_error());
//! assert_eq!(issue.to_string(), "generation.top_p: must be within [0, 1]");
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field (e.g. `chat.history_mode`).
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
