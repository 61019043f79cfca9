//! Request assembly.
//!
//! Turns stored history plus a just-submitted user message into the ordered,
//! role-tagged message list the completion endpoint expects:
//!
//! ```text
//! None:        [system?, user:new]
//! FullFlat:    [system?, ...history..., user:new]
//! FullPaired:  [system?, (user, assistant)*, user:new]   empty sides omitted
//! ```
//!
//! Turns are never reordered or deduplicated.

use crate::session::entities::{Exchange, Turn, fold_exchanges};
use crate::session::history::{HistoryInclusionMode, HistoryWindow};

/// Builds outgoing message lists according to a history policy.
///
/// # Examples
///
/// ```
/// use legalease_domain::{Exchange, HistoryInclusionMode, RequestBuilder, Role};
///
/// let builder = RequestBuilder::new(HistoryInclusionMode::FullPaired)
///     .with_system_instruction("You are a legal assistant.");
/// let messages = builder.build_from_exchanges(
///     &[Exchange::new("Q1", "A1"), Exchange::new("Q2", "")],
///     "Q3",
/// );
/// let roles: Vec<Role> = messages.iter().map(|t| t.role()).collect();
/// assert_eq!(
///     roles,
///     [Role::System, Role::User, Role::Assistant, Role::User, Role::User]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBuilder {
    mode: HistoryInclusionMode,
    system_instruction: Option<String>,
    window: HistoryWindow,
}

impl RequestBuilder {
    pub fn new(mode: HistoryInclusionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Prepend a system turn to every request. Blank instructions are ignored.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        let instruction = instruction.into();
        self.system_instruction = if instruction.trim().is_empty() {
            None
        } else {
            Some(instruction)
        };
        self
    }

    pub fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn mode(&self) -> HistoryInclusionMode {
        self.mode
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn window(&self) -> HistoryWindow {
        self.window
    }

    /// Assemble the request for `new_message` given the history that
    /// precedes it.
    pub fn build(&self, history: &[Turn], new_message: &str) -> Vec<Turn> {
        match self.mode {
            HistoryInclusionMode::None => self.assemble(std::iter::empty(), new_message),
            HistoryInclusionMode::FullFlat => {
                let history = self.window.apply(history);
                self.assemble(history.iter().cloned(), new_message)
            }
            HistoryInclusionMode::FullPaired => {
                let exchanges = fold_exchanges(self.window.apply(history));
                self.build_from_exchanges(&exchanges, new_message)
            }
        }
    }

    /// Assemble the request from pair-shaped history.
    ///
    /// Each pair contributes a user turn then an assistant turn; an empty
    /// side is dropped without dropping the other side.
    pub fn build_from_exchanges(&self, exchanges: &[Exchange], new_message: &str) -> Vec<Turn> {
        let history = exchanges.iter().flat_map(|exchange| {
            let user = (!exchange.user.trim().is_empty()).then(|| Turn::user(&exchange.user));
            let assistant = (!exchange.assistant.trim().is_empty())
                .then(|| Turn::assistant(&exchange.assistant));
            user.into_iter().chain(assistant)
        });
        self.assemble(history, new_message)
    }

    fn assemble(&self, history: impl Iterator<Item = Turn>, new_message: &str) -> Vec<Turn> {
        let mut messages: Vec<Turn> = self
            .system_instruction
            .iter()
            .map(Turn::system)
            .collect();
        messages.extend(history);
        messages.push(Turn::user(new_message));
        messages
    }
}
