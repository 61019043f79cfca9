//! Display and line-editor settings
//!
//! Resolved by the binary from the file configuration and CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How replies and transcripts are printed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the (question, answer) pair view after each reply
    pub show_plain_history: bool,
    /// Show the spinner while waiting for a reply
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_plain_history: false,
            show_progress: true,
        }
    }
}

/// Interactive session settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Path to history file (no persistent history when unset)
    pub history_file: Option<PathBuf>,
}
