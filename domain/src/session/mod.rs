//! Conversation session domain.
//!
//! - [`entities::Turn`]: a single role-tagged message
//! - [`entities::Conversation`]: the append-only sequence of turns
//! - [`parameters::GenerationParameters`]: sampling knobs owned by a session
//! - [`history`]: how much history goes into each request
//! - [`request::RequestBuilder`]: assembles the outgoing message list
//! - [`response::normalize_response`]: post-processes the model's reply
//! - [`stream::StreamEvent`]: incremental delivery of a reply
//! - [`store::ChatSession`]: the per-session store and its state machine

pub mod entities;
pub mod history;
pub mod parameters;
pub mod request;
pub mod response;
pub mod store;
pub mod stream;
