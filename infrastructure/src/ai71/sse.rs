//! Server-Sent Events parsing for streaming completions.
//!
//! [`SseParser`] is a line-oriented state machine with no I/O, so the
//! framing rules can be tested directly. [`forward_events`] drives it from
//! any buffered reader and turns each frame into a [`StreamEvent`].

use super::protocol::parse_chunk;
use legalease_domain::StreamEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Sentinel payload that ends a completion stream.
pub const DONE_MARKER: &str = "[DONE]";

/// A complete SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// The joined `data:` lines of one event.
    Data(String),
    /// `data: [DONE]`.
    Done,
}

#[derive(Debug, Default)]
pub struct SseParser {
    data: String,
    has_data: bool,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator). Returns a frame when the line
    /// completes an event.
    pub fn feed_line(&mut self, line: &str) -> Option<SseFrame> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        // event:, id: and retry: carry nothing the chat uses
        if field == "data" {
            if self.has_data {
                self.data.push('\n');
            }
            self.data.push_str(value);
            self.has_data = true;
        }
        None
    }

    /// Flush a trailing event not followed by a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        self.dispatch()
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if !self.has_data {
            return None;
        }
        self.has_data = false;
        let data = std::mem::take(&mut self.data);
        if data.trim() == DONE_MARKER {
            Some(SseFrame::Done)
        } else {
            Some(SseFrame::Data(data))
        }
    }
}

/// Read SSE lines from `reader` and forward text fragments to `tx`.
///
/// Ends with `Completed` on `[DONE]` or end of input, or with `Error` on a
/// read failure or an unparsable payload. Returns as soon as the receiver is
/// dropped, even while a read is pending, which releases the connection.
pub async fn forward_events<R>(reader: R, tx: mpsc::Sender<StreamEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut parser = SseParser::new();
    let mut fragments = 0usize;

    loop {
        let next = tokio::select! {
            line = lines.next_line() => line,
            _ = tx.closed() => {
                debug!("Stream receiver dropped after {} fragment(s)", fragments);
                return;
            }
        };
        let frame = match next {
            Ok(Some(line)) => parser.feed_line(&line),
            Ok(None) => {
                let frame = parser.finish();
                if frame.is_none() {
                    debug!("Stream ended without [DONE] after {} fragment(s)", fragments);
                    let _ = tx.send(StreamEvent::Completed(String::new())).await;
                    return;
                }
                frame
            }
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        match frame {
            None => continue,
            Some(SseFrame::Done) => {
                debug!("Stream completed with {} fragment(s)", fragments);
                let _ = tx.send(StreamEvent::Completed(String::new())).await;
                return;
            }
            Some(SseFrame::Data(data)) => match parse_chunk(&data) {
                Ok(Some(text)) => {
                    trace!("Stream fragment: {} bytes", text.len());
                    fragments += 1;
                    if tx.send(StreamEvent::Delta(text)).await.is_err() {
                        debug!("Stream receiver dropped");
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    let _ = tx
                        .send(StreamEvent::Error(format!("malformed stream chunk: {}", e)))
                        .await;
                    return;
                }
            },
        }
    }
}
