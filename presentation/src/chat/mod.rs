//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface for Legal Ease.

mod repl;

pub use repl::ChatRepl;
