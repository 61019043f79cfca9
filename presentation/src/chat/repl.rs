//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use legalease_application::{SendMessageUseCase, SendOutcome, SessionRegistry};
use legalease_domain::{ChatSession, SessionId};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
///
/// Owns one live session at a time. `/new` discards it and starts a fresh
/// one; nothing survives the process.
pub struct ChatRepl {
    use_case: SendMessageUseCase,
    registry: SessionRegistry,
    session_id: SessionId,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    pub fn new(use_case: SendMessageUseCase) -> Self {
        let registry = SessionRegistry::new(use_case.config().clone());
        Self {
            use_case,
            registry,
            session_id: SessionId::generate(),
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// The live session, created on first access.
    pub fn session(&mut self) -> &ChatSession {
        self.registry.get_or_create(&self.session_id)
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("legalease".to_string()),
            DefaultPromptSegment::Empty,
        );

        let config = self.use_case.config();
        println!("{}", ConsoleFormatter::welcome(&config.model, config.history_mode));
        self.print_greeting();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    self.send(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        self.registry.end(&self.session_id);
        Ok(())
    }

    /// Send one message on the live session and print the outcome.
    ///
    /// Returns `false` if the completion request failed.
    pub async fn send(&mut self, input: &str) -> bool {
        let progress = if self.output.show_progress {
            ProgressReporter::new()
        } else {
            ProgressReporter::quiet()
        };

        let session = self.registry.get_or_create(&self.session_id);
        let result = self.use_case.execute(session, input, &progress).await;

        match result {
            Ok(SendOutcome::Replied(turn)) => {
                if !progress.streamed() {
                    println!("{}", ConsoleFormatter::format_turn(&turn));
                }
                if self.output.show_plain_history {
                    let exchanges = session.conversation().exchanges();
                    println!("{}", ConsoleFormatter::format_plain_pairs(&exchanges));
                }
                println!();
                true
            }
            Ok(SendOutcome::Ignored) => true,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e));
                println!();
                false
            }
        }
    }

    /// Handle slash commands. Returns true if should exit.
    pub async fn handle_command(&mut self, cmd: &str) -> bool {
        let mut parts = cmd.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!("{}", ConsoleFormatter::help());
                false
            }
            "/params" => {
                let session = self.registry.get_or_create(&self.session_id);
                println!(
                    "{}",
                    ConsoleFormatter::format_params(session.parameters(), session.constraint())
                );
                false
            }
            "/models" => {
                match self.use_case.available_models().await {
                    Ok(models) => println!(
                        "{}",
                        ConsoleFormatter::format_models(&models, &self.use_case.config().model)
                    ),
                    Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
                }
                false
            }
            "/set" => {
                self.set_parameter(&args);
                false
            }
            "/transcript" => {
                let session = self.registry.get_or_create(&self.session_id);
                println!("{}", ConsoleFormatter::format_transcript(session.conversation()));
                false
            }
            "/plain" => {
                let session = self.registry.get_or_create(&self.session_id);
                let exchanges = session.conversation().exchanges();
                println!("{}", ConsoleFormatter::format_plain_pairs(&exchanges));
                false
            }
            "/new" => {
                self.registry.end(&self.session_id);
                self.session_id = SessionId::generate();
                debug!("Started session {}", self.session_id);
                println!("Started a new conversation.");
                self.print_greeting();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    fn set_parameter(&mut self, args: &[&str]) {
        let [field, value] = args else {
            println!("Usage: /set <max_tokens|temperature|top_p> <value>");
            return;
        };

        let session = self.registry.get_or_create(&self.session_id);
        let result = session
            .parameters()
            .with_field(field, value)
            .and_then(|updated| session.set_parameters(updated));

        match result {
            Ok(()) => println!(
                "{}",
                ConsoleFormatter::format_params(session.parameters(), session.constraint())
            ),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
        }
    }

    fn print_greeting(&mut self) {
        let session = self.registry.get_or_create(&self.session_id);
        if let Some(greeting) = session.conversation().greeting() {
            println!("{}\n", ConsoleFormatter::format_turn(greeting));
        }
    }

    fn line_editor(&self) -> Reedline {
        let line_editor = Reedline::create();
        let Some(path) = &self.repl.history_file else {
            return line_editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => line_editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                line_editor
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use legalease_application::{
        ChatConfig, CompletionRequest, CompletionResponse, GatewayError, LlmGateway,
    };
    use legalease_domain::{GenerationParameters, Role, Turn};
    use std::sync::{Arc, Mutex};

    struct EchoGateway {
        fail: bool,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl EchoGateway {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(GatewayError::RateLimited("quota exceeded".to_string()));
            }
            let last = request.messages.last().map(Turn::content).unwrap_or_default();
            Ok(CompletionResponse::from_text(format!("Re: {} User:", last)))
        }
    }

    fn repl(gateway: Arc<EchoGateway>) -> ChatRepl {
        let use_case = SendMessageUseCase::new(gateway, ChatConfig::default().with_greeting("Hi!"));
        ChatRepl::new(use_case).with_output(OutputConfig {
            show_progress: false,
            ..OutputConfig::default()
        })
    }

    #[tokio::test]
    async fn test_send_records_normalized_reply() {
        let mut repl = repl(EchoGateway::new(false));
        assert!(repl.send("Can I break my lease?").await);

        let turns = repl.session().conversation().turns().to_vec();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0], Turn::assistant("Hi!"));
        assert_eq!(turns[2], Turn::assistant("Re: Can I break my lease?"));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_user_turn() {
        let mut repl = repl(EchoGateway::new(true));
        assert!(!repl.send("Q").await);

        let last = repl.session().conversation().last().cloned().unwrap();
        assert_eq!(last.role(), Role::User);
    }

    #[tokio::test]
    async fn test_new_discards_conversation() {
        let mut repl = repl(EchoGateway::new(false));
        repl.send("Q1").await;
        let old_id = repl.session().id().clone();

        assert!(!repl.handle_command("/new").await);

        assert_ne!(repl.session().id(), &old_id);
        assert_eq!(repl.session().conversation().len(), 1);
        assert_eq!(repl.registry.len(), 1);
    }

    #[tokio::test]
    async fn test_set_updates_parameters_sent() {
        let gateway = EchoGateway::new(false);
        let mut repl = repl(gateway.clone());

        repl.handle_command("/set max_tokens 256").await;
        repl.handle_command("/set temperature hot").await;
        repl.send("Q").await;

        let expected = GenerationParameters::new(256, 0.7, 0.95).unwrap();
        assert_eq!(repl.session().parameters(), &expected);
        assert_eq!(gateway.requests.lock().unwrap()[0].max_tokens, 256);
    }

    #[tokio::test]
    async fn test_models_command_does_not_exit() {
        let gateway = EchoGateway::new(false);
        let mut repl = repl(gateway.clone());
        assert!(!repl.handle_command("/models").await);
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quit_commands_exit() {
        let mut repl = repl(EchoGateway::new(false));
        assert!(repl.handle_command("/quit").await);
        assert!(repl.handle_command("/q").await);
        assert!(!repl.handle_command("/unknown").await);
        assert!(!repl.handle_command("/set").await);
    }
}
