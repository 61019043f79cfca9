//! Chat configuration: request assembly and call behavior.

use legalease_domain::{
    GenerationParameters, HistoryInclusionMode, HistoryWindow, Model, ParameterConstraint,
    RequestBuilder,
};
use std::time::Duration;

/// Greeting shown as the first assistant turn of every new session.
pub const DEFAULT_GREETING: &str = "Hi! This is your Legal Ease \u{1f9d1}\u{200d}\u{2696}\u{fe0f}. \
Please describe your legal question or issue. For example: \
'I need help understanding a contract clause.'";

/// Chat behavior configuration.
///
/// The defaults reproduce the primary observed behavior: the Falcon 180B
/// chat model, no system instruction, only the newest message sent, and a
/// single non-streaming call.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model named in every completion request.
    pub model: Model,
    /// How much stored history accompanies a new message.
    pub history_mode: HistoryInclusionMode,
    /// Truncation applied to the history before it is sent.
    pub history_window: HistoryWindow,
    /// Optional system turn prepended to every request.
    pub system_instruction: Option<String>,
    /// Request incremental delivery instead of one atomic reply.
    pub stream: bool,
    /// First assistant turn of a new session.
    pub greeting: String,
    /// Generation parameters a new session starts with.
    pub parameters: GenerationParameters,
    /// Checks applied to parameter updates.
    pub constraint: ParameterConstraint,
    /// Maximum time to wait for the completion call.
    pub timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            history_mode: HistoryInclusionMode::default(),
            history_window: HistoryWindow::default(),
            system_instruction: None,
            stream: false,
            greeting: DEFAULT_GREETING.to_string(),
            parameters: GenerationParameters::default(),
            constraint: ParameterConstraint::default(),
            timeout: None,
        }
    }
}

impl ChatConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_history_mode(mut self, mode: HistoryInclusionMode) -> Self {
        self.history_mode = mode;
        self
    }

    pub fn with_history_window(mut self, window: HistoryWindow) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_constraint(mut self, constraint: ParameterConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The request builder described by this configuration.
    pub fn request_builder(&self) -> RequestBuilder {
        let builder = RequestBuilder::new(self.history_mode).with_window(self.history_window);
        match &self.system_instruction {
            Some(instruction) => builder.with_system_instruction(instruction.as_str()),
            None => builder,
        }
    }
}
