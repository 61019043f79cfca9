//! Model configuration from TOML (`[model]` section)

use legalease_domain::{ConfigIssue, Model};
use serde::{Deserialize, Serialize};

/// Raw model configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent with every request
    pub name: Model,
}

impl FileModelConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.name.as_str().trim().is_empty() {
            issues.push(ConfigIssue::error("model.name", "model name cannot be empty"));
        } else if self.name.is_custom() {
            issues.push(ConfigIssue::warning(
                "model.name",
                format!("'{}' is not a known AI71 model", self.name),
            ));
        }
        issues
    }
}
