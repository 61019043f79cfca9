//! Session registry.
//!
//! Keeps one [`ChatSession`] per interactive session. A session is created
//! on first contact with the configured greeting and parameters, and is
//! dropped when the session ends. Nothing is persisted.

use crate::config::ChatConfig;
use legalease_domain::{ChatSession, SessionId};
use std::collections::HashMap;
use tracing::debug;

pub struct SessionRegistry {
    sessions: HashMap<SessionId, ChatSession>,
    config: ChatConfig,
}

impl SessionRegistry {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    /// Return the session for `id`, initializing it on first contact.
    pub fn get_or_create(&mut self, id: &SessionId) -> &mut ChatSession {
        let config = &self.config;
        self.sessions.entry(id.clone()).or_insert_with(|| {
            debug!("Initializing session {}", id);
            let mut session = ChatSession::initialize(id.clone(), config.greeting.as_str())
                .with_constraint(config.constraint.clone());
            // Configured defaults that violate the constraint fall back to
            // the built-in defaults.
            if session.set_parameters(config.parameters).is_err() {
                debug!("Configured parameters rejected for session {}", id);
            }
            session
        })
    }

    pub fn get(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.get(id)
    }

    /// Discard a session and everything it stored.
    pub fn end(&mut self, id: &SessionId) -> Option<ChatSession> {
        let removed = self.sessions.remove(id);
        if removed.is_some() {
            debug!("Ended session {}", id);
        }
        removed
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
