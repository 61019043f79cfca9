//! `[output]` section

use serde::{Deserialize, Serialize};

/// Console display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// ANSI colors on
    pub color: bool,
    /// Print the (user, assistant) pair view after each reply
    pub show_plain_history: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_plain_history: false,
        }
    }
}
