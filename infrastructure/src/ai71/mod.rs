//! AI71 chat completions adapter
//!
//! Implements the [`LlmGateway`](legalease_application::LlmGateway) port over
//! the AI71 HTTP API:
//!
//! ```text
//! Ai71Gateway ── POST {base_url}/chat/completions ──▶ api.ai71.ai
//!      │                                                  │
//!      │◀──────── JSON body (stream = false) ─────────────┤
//!      │◀──────── SSE `data:` lines (stream = true) ──────┘
//!      ▼
//!  StreamHandle (mpsc) ◀── spawned reader task ◀── SseParser
//! ```

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod sse;
