//! Progress notification port
//!
//! Defines the interface for reporting progress while a completion call is
//! in flight.

use legalease_domain::Model;

/// Callback for progress updates during a completion call
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, live fragment printing, etc.)
pub trait ChatProgressNotifier: Send + Sync {
    /// Called when the request is about to be sent
    fn on_request_start(&self, model: &Model, message_count: usize);

    /// Called for each text fragment of a streaming reply.
    fn on_chunk(&self, _chunk: &str) {}

    /// Called when the call finished, successfully or not
    fn on_request_end(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ChatProgressNotifier for NoProgress {
    fn on_request_start(&self, _model: &Model, _message_count: usize) {}
    fn on_request_end(&self, _success: bool) {}
}
