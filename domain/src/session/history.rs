//! History inclusion policy.
//!
//! Decides how much of the stored conversation goes out with each request.

use crate::core::error::DomainError;
use crate::session::entities::Turn;
use serde::{Deserialize, Serialize};

/// Which prior turns are sent alongside a new user message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryInclusionMode {
    /// Only the new user message (plus the system instruction, if any).
    #[default]
    #[serde(rename = "none")]
    None,
    /// Every stored turn, verbatim and in order.
    #[serde(rename = "flat")]
    FullFlat,
    /// Stored turns folded into `(user, assistant)` pairs; empty sides are
    /// omitted.
    #[serde(rename = "paired")]
    FullPaired,
}

impl HistoryInclusionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryInclusionMode::None => "none",
            HistoryInclusionMode::FullFlat => "flat",
            HistoryInclusionMode::FullPaired => "paired",
        }
    }

    pub fn includes_history(&self) -> bool {
        !matches!(self, HistoryInclusionMode::None)
    }
}

impl std::fmt::Display for HistoryInclusionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryInclusionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(HistoryInclusionMode::None),
            "flat" | "full_flat" | "full-flat" => Ok(HistoryInclusionMode::FullFlat),
            "paired" | "pairs" | "full_paired" | "full-paired" => {
                Ok(HistoryInclusionMode::FullPaired)
            }
            _ => Err(DomainError::UnknownHistoryMode(s.to_string())),
        }
    }
}

/// Truncation policy applied to stored history before it is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Send everything.
    #[default]
    Unbounded,
    /// Send only the most recent `n` turns.
    LastTurns(usize),
}

impl HistoryWindow {
    pub fn from_limit(limit: Option<usize>) -> Self {
        limit.map_or(HistoryWindow::Unbounded, HistoryWindow::LastTurns)
    }

    /// The suffix of `turns` that falls inside the window.
    pub fn apply<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        match self {
            HistoryWindow::Unbounded => turns,
            HistoryWindow::LastTurns(n) => &turns[turns.len().saturating_sub(*n)..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_sends_no_history() {
        assert_eq!(HistoryInclusionMode::default(), HistoryInclusionMode::None);
        assert!(!HistoryInclusionMode::None.includes_history());
        assert!(HistoryInclusionMode::FullPaired.includes_history());
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("flat".parse::<HistoryInclusionMode>().unwrap(), HistoryInclusionMode::FullFlat);
        assert_eq!(
            "Full-Paired".parse::<HistoryInclusionMode>().unwrap(),
            HistoryInclusionMode::FullPaired
        );
        assert!(matches!(
            "everything".parse::<HistoryInclusionMode>(),
            Err(DomainError::UnknownHistoryMode(_))
        ));
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&HistoryInclusionMode::FullPaired).unwrap();
        assert_eq!(json, "\"paired\"");
        let mode: HistoryInclusionMode = serde_json::from_str("\"flat\"").unwrap();
        assert_eq!(mode, HistoryInclusionMode::FullFlat);
    }

    #[test]
    fn window_keeps_most_recent_turns() {
        let turns = vec![Turn::user("Q1"), Turn::assistant("A1"), Turn::user("Q2")];
        assert_eq!(HistoryWindow::Unbounded.apply(&turns).len(), 3);
        assert_eq!(HistoryWindow::LastTurns(2).apply(&turns), &turns[1..]);
        assert_eq!(HistoryWindow::LastTurns(10).apply(&turns).len(), 3);
        assert!(HistoryWindow::LastTurns(0).apply(&turns).is_empty());
    }

    #[test]
    fn window_from_limit() {
        assert_eq!(HistoryWindow::from_limit(None), HistoryWindow::Unbounded);
        assert_eq!(HistoryWindow::from_limit(Some(4)), HistoryWindow::LastTurns(4));
    }
}
