//! The per-session store.
//!
//! A [`ChatSession`] owns one [`Conversation`] and one set of
//! [`GenerationParameters`] for the lifetime of an interactive session, and
//! tracks the `Idle → AwaitingResponse → Idle` request cycle.

use crate::core::error::DomainError;
use crate::session::entities::{Conversation, Turn};
use crate::session::parameters::{GenerationParameters, ParameterConstraint};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of an interactive session (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A process-unique id built from the current time and a counter.
    pub fn generate() -> Self {
        let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("session-{}-{}", Utc::now().timestamp_millis(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Request state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Ready to accept a submission.
    #[default]
    Idle,
    /// A completion call is in flight; further submissions are refused.
    AwaitingResponse,
}

/// Conversation and generation parameters for one interactive session
/// (Entity)
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    conversation: Conversation,
    parameters: GenerationParameters,
    constraint: ParameterConstraint,
    state: SessionState,
    created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a session whose transcript starts with `greeting`, using
    /// default generation parameters.
    pub fn initialize(id: SessionId, greeting: impl Into<String>) -> Self {
        Self {
            id,
            conversation: Conversation::seeded(greeting),
            parameters: GenerationParameters::default(),
            constraint: ParameterConstraint::default(),
            state: SessionState::Idle,
            created_at: Utc::now(),
        }
    }

    /// Restrict future parameter updates with `constraint`.
    pub fn with_constraint(mut self, constraint: ParameterConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Add a turn to the end of the conversation.
    pub fn append(&mut self, turn: Turn) {
        self.conversation.push(turn);
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    pub fn constraint(&self) -> &ParameterConstraint {
        &self.constraint
    }

    /// Validate and replace the generation parameters.
    ///
    /// On rejection the stored value is left untouched.
    pub fn set_parameters(&mut self, parameters: GenerationParameters) -> Result<(), DomainError> {
        self.constraint.check(&parameters)?;
        self.parameters = parameters;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// `Idle → AwaitingResponse`. Fails if a request is already in flight.
    pub fn begin_request(&mut self) -> Result<(), DomainError> {
        if self.state == SessionState::AwaitingResponse {
            return Err(DomainError::SessionBusy);
        }
        self.state = SessionState::AwaitingResponse;
        Ok(())
    }

    /// `AwaitingResponse → Idle`, on success and failure alike.
    pub fn finish_request(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;
    use crate::session::parameters::ParameterChoices;

    fn session() -> ChatSession {
        ChatSession::initialize(SessionId::new("test"), "Hi! How can I help?")
    }

    #[test]
    fn initialize_seeds_one_assistant_turn() {
        let session = session();
        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role(), Role::Assistant);
        assert_eq!(session.parameters(), &GenerationParameters::default());
        assert!(session.is_idle());
    }

    #[test]
    fn append_preserves_order() {
        let mut session = session();
        session.append(Turn::user("Q1"));
        session.append(Turn::assistant("A1"));
        let roles: Vec<Role> = session.conversation().turns().iter().map(Turn::role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn set_parameters_replaces_valid_value() {
        let mut session = session();
        let params = GenerationParameters::new(256, 0.3, 0.9).unwrap();
        session.set_parameters(params).unwrap();
        assert_eq!(session.parameters(), &params);
    }

    #[test]
    fn set_parameters_rejects_choice_outside_set() {
        let mut session =
            session().with_constraint(ParameterConstraint::Choices(ParameterChoices::default()));
        let params = GenerationParameters::new(300, 0.7, 0.95).unwrap();
        assert!(session.set_parameters(params).is_err());
        assert_eq!(session.parameters(), &GenerationParameters::default());
    }

    #[test]
    fn request_cycle() {
        let mut session = session();
        session.begin_request().unwrap();
        assert_eq!(session.state(), SessionState::AwaitingResponse);
        assert_eq!(session.begin_request(), Err(DomainError::SessionBusy));
        session.finish_request();
        assert!(session.is_idle());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
