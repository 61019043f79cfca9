//! Domain layer for Legal Ease
//!
//! This crate contains the conversation model, generation parameters and the
//! request-assembly rules. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session Store
//!
//! A [`ChatSession`] owns exactly one [`Conversation`] and one set of
//! [`GenerationParameters`]. It is created on first contact and discarded
//! when the interactive session ends.
//!
//! ## Request assembly
//!
//! The [`RequestBuilder`] turns stored history plus a new user message into
//! the ordered, role-tagged message list sent to the completion endpoint.
//! How much history goes out is a policy ([`HistoryInclusionMode`] and
//! [`HistoryWindow`]), not a hardcoded behavior.
//!
//! ## Reply normalization
//!
//! [`normalize_response`] removes the hallucinated `User:` turn marker the
//! hosted model sometimes appends to its completion.

pub mod config;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, Severity};
pub use core::{error::DomainError, model::Model};
pub use session::{
    entities::{Conversation, Exchange, Role, Turn, fold_exchanges},
    history::{HistoryInclusionMode, HistoryWindow},
    parameters::{GenerationParameters, ParameterChoices, ParameterConstraint},
    request::RequestBuilder,
    response::{TURN_MARKER, normalize_response},
    store::{ChatSession, SessionId, SessionState},
    stream::{StreamAccumulator, StreamEvent},
};
