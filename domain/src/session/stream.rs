//! Streaming events for incremental reply delivery.
//!
//! A streamed completion arrives as [`StreamEvent`]s so the reply can be
//! shown while it is produced. [`StreamAccumulator`] rebuilds the full reply.

/// One step of a streamed completion, as decoded from the wire.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum StreamEvent {
    /// Next piece of reply text.
    Delta(String),
    /// End of stream, carrying whatever full text the source reported.
    Completed(String),
    /// The stream broke; no more events follow.
    Error(String),
}

impl StreamEvent {
    /// Reply text carried by the event. Errors carry none.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Error(_) => None,
            StreamEvent::Delta(text) | StreamEvent::Completed(text) => Some(text),
        }
    }

    /// Whether the stream is over after this event.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}

/// Concatenates streamed fragments in arrival order.
///
/// Partial fragments are only ever held here; nothing is stored in the
/// conversation until the stream is finished.
#[derive(Default, Debug, Clone)]
pub struct StreamAccumulator {
    text: String,
    fragments: usize,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Empty fragments are ignored.
    pub fn push(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.push_str(fragment);
        self.fragments += 1;
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The reconstructed reply.
    ///
    /// When no fragment arrived, the text carried by the terminal
    /// `Completed` event (if any) is used instead.
    pub fn finish(self, completed: Option<String>) -> String {
        match completed {
            Some(full) if self.fragments == 0 => full,
            _ => self.text,
        }
    }
}
