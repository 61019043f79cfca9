//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
///
/// Serializes to the lowercase names the completion endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message (Entity)
///
/// Turns are immutable once created: there are no setters, only
/// constructors and accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when the content is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A `(user, assistant)` pair, the history shape used by the paired
/// request mode and the plain transcript view.
///
/// Either side may be empty: a question still awaiting (or missing) its
/// answer, or an assistant turn with no preceding question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

impl Exchange {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Fold a flat turn sequence into `(user, assistant)` pairs.
///
/// A user turn opens a pair and the next assistant turn closes it. An
/// assistant turn with no open question gets an empty user side, and a
/// user turn followed by another user turn (or by nothing) gets an empty
/// assistant side. System turns are not part of any pair.
pub fn fold_exchanges(turns: &[Turn]) -> Vec<Exchange> {
    let mut exchanges = Vec::new();
    let mut open: Option<&str> = None;

    for turn in turns {
        match turn.role() {
            Role::User => {
                if let Some(question) = open.replace(turn.content()) {
                    exchanges.push(Exchange::new(question, ""));
                }
            }
            Role::Assistant => {
                let question = open.take().unwrap_or_default();
                exchanges.push(Exchange::new(question, turn.content()));
            }
            Role::System => {}
        }
    }

    if let Some(question) = open {
        exchanges.push(Exchange::new(question, ""));
    }

    exchanges
}

/// The ordered, append-only sequence of turns in one session (Entity)
///
/// Insertion order is both the display order and the order presented to
/// the completion endpoint. A conversation may start with a greeting: an
/// assistant turn shown in the transcript but never sent as history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
    greeting_len: usize,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation whose first turn is the assistant's greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::assistant(greeting)],
            greeting_len: 1,
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns after the greeting: the history eligible for requests.
    pub fn history(&self) -> &[Turn] {
        &self.turns[self.greeting_len..]
    }

    /// The history folded into `(user, assistant)` pairs.
    pub fn exchanges(&self) -> Vec<Exchange> {
        fold_exchanges(self.history())
    }

    pub fn greeting(&self) -> Option<&Turn> {
        if self.greeting_len > 0 {
            self.turns.first()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(role, Role::System);
    }

    #[test]
    fn whitespace_turn_is_empty() {
        assert!(Turn::user("  \n").is_empty());
        assert!(!Turn::user("Is this clause enforceable?").is_empty());
    }

    #[test]
    fn seeded_conversation_has_single_assistant_turn() {
        let conversation = Conversation::seeded("Hi!");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.turns()[0].role(), Role::Assistant);
        assert!(conversation.history().is_empty());
        assert_eq!(conversation.greeting().map(Turn::content), Some("Hi!"));
    }

    #[test]
    fn history_skips_greeting_only() {
        let mut conversation = Conversation::seeded("Hi!");
        conversation.push(Turn::user("Q1"));
        conversation.push(Turn::assistant("A1"));

        assert_eq!(conversation.len(), 3);
        assert_eq!(
            conversation.history(),
            &[Turn::user("Q1"), Turn::assistant("A1")]
        );
        assert_eq!(conversation.last(), Some(&Turn::assistant("A1")));
    }

    #[test]
    fn unseeded_conversation_has_no_greeting() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());
        conversation.push(Turn::assistant("Welcome"));
        assert!(conversation.greeting().is_none());
        assert_eq!(conversation.history().len(), 1);
    }

    #[test]
    fn fold_pairs_in_order() {
        let turns = vec![
            Turn::user("Q1"),
            Turn::assistant("A1"),
            Turn::user("Q2"),
            Turn::assistant("A2"),
        ];
        assert_eq!(
            fold_exchanges(&turns),
            vec![Exchange::new("Q1", "A1"), Exchange::new("Q2", "A2")]
        );
    }

    #[test]
    fn fold_trailing_question_has_empty_answer() {
        let turns = vec![Turn::user("Q1"), Turn::assistant("A1"), Turn::user("Q2")];
        assert_eq!(
            fold_exchanges(&turns),
            vec![Exchange::new("Q1", "A1"), Exchange::new("Q2", "")]
        );
    }

    #[test]
    fn fold_unanswered_question_followed_by_question() {
        // A failed request leaves a user turn with no answer
        let turns = vec![Turn::user("Q1"), Turn::user("Q2"), Turn::assistant("A2")];
        assert_eq!(
            fold_exchanges(&turns),
            vec![Exchange::new("Q1", ""), Exchange::new("Q2", "A2")]
        );
    }

    #[test]
    fn fold_orphan_answer_and_system_turns() {
        let turns = vec![
            Turn::system("Be concise."),
            Turn::assistant("Welcome back"),
            Turn::user("Q1"),
        ];
        assert_eq!(
            fold_exchanges(&turns),
            vec![Exchange::new("", "Welcome back"), Exchange::new("Q1", "")]
        );
    }
}
