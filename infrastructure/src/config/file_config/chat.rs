//! Chat configuration from TOML (`[chat]` section)

use legalease_domain::{ConfigIssue, HistoryInclusionMode, HistoryWindow};
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// History inclusion mode ("none", "flat", "paired")
    pub history_mode: String,
    /// Maximum number of stored turns sent with a request (unset = all)
    pub history_window: Option<usize>,
    /// System turn prepended to every request
    pub system_instruction: Option<String>,
    /// Request incremental delivery
    pub stream: bool,
    /// Greeting shown when a session starts
    pub greeting: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            history_mode: HistoryInclusionMode::default().as_str().to_string(),
            history_window: None,
            system_instruction: None,
            stream: false,
            greeting: None,
        }
    }
}

impl FileChatConfig {
    /// Parse `history_mode`, falling back to the default on unknown values.
    pub fn parse_history_mode(&self) -> (HistoryInclusionMode, Vec<ConfigIssue>) {
        match self.history_mode.parse::<HistoryInclusionMode>() {
            Ok(mode) => (mode, Vec::new()),
            Err(e) => (
                HistoryInclusionMode::default(),
                vec![ConfigIssue::error("chat.history_mode", e.to_string())],
            ),
        }
    }

    pub fn history_window(&self) -> HistoryWindow {
        HistoryWindow::from_limit(self.history_window)
    }

    pub fn system_instruction(&self) -> Option<String> {
        self.system_instruction
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .cloned()
    }

    pub fn validate_window(&self) -> Vec<ConfigIssue> {
        let (mode, _) = self.parse_history_mode();
        let mut issues = Vec::new();
        if self.history_window.is_some() && !mode.includes_history() {
            issues.push(ConfigIssue::warning(
                "chat.history_window",
                "has no effect while history_mode is \"none\"",
            ));
        }
        issues
    }
}
