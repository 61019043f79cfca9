//! Console output formatter for chat sessions

use colored::Colorize;
use legalease_domain::{
    Conversation, Exchange, GenerationParameters, HistoryInclusionMode, Model,
    ParameterConstraint, Role, Turn,
};

const ASSISTANT_NAME: &str = "Legal Ease";

/// Formats conversation state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for all console output.
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    pub fn welcome(model: &Model, mode: HistoryInclusionMode) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&Self::header("Legal Ease \u{2696}"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push_str(&format!("{} {}\n", "History:".cyan().bold(), mode));
        output.push_str(&format!(
            "{}\n",
            "Information only; consult a legal professional for advice on your situation."
                .dimmed()
        ));
        output.push_str(&format!("{}\n", "Type /help for commands.".dimmed()));
        output
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        output.push_str("  /help, /h, /?            - Show this help\n");
        output.push_str("  /params                  - Show generation parameters\n");
        output.push_str("  /models                  - List the models the endpoint serves\n");
        output.push_str("  /set <field> <value>     - Change max_tokens, temperature or top_p\n");
        output.push_str("  /transcript              - Show the whole conversation\n");
        output.push_str("  /plain                   - Show the conversation as question/answer pairs\n");
        output.push_str("  /new                     - Discard this conversation and start over\n");
        output.push_str("  /quit, /exit, /q         - Exit chat\n");
        output
    }

    /// One role-tagged turn.
    pub fn format_turn(turn: &Turn) -> String {
        let label = match turn.role() {
            Role::Assistant => format!("{}:", ASSISTANT_NAME).cyan().bold(),
            Role::User => "You:".green().bold(),
            Role::System => "System:".dimmed(),
        };
        format!("{} {}", label, turn.content())
    }

    /// Every turn in display order, greeting included.
    pub fn format_transcript(conversation: &Conversation) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Transcript"));
        for turn in conversation.turns() {
            output.push('\n');
            output.push_str(&Self::format_turn(turn));
            output.push('\n');
        }
        output
    }

    /// The auxiliary pair view: numbered question and answer lines.
    pub fn format_plain_pairs(exchanges: &[Exchange]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Questions and answers"));
        if exchanges.is_empty() {
            output.push_str(&format!("{}\n", "(no questions yet)".dimmed()));
            return output;
        }
        for (i, exchange) in exchanges.iter().enumerate() {
            let n = i + 1;
            let question = Self::or_placeholder(&exchange.user, "(no question)");
            let answer = Self::or_placeholder(&exchange.assistant, "(no answer)");
            output.push_str(&format!("{} {}\n", format!("Q{}.", n).green().bold(), question));
            output.push_str(&format!("{} {}\n", format!("A{}.", n).cyan().bold(), answer));
        }
        output
    }

    pub fn format_params(parameters: &GenerationParameters, constraint: &ParameterConstraint) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Generation parameters"));
        output.push_str(&format!("  max_tokens  = {}\n", parameters.max_tokens()));
        output.push_str(&format!("  temperature = {}\n", parameters.temperature()));
        output.push_str(&format!("  top_p       = {}\n", parameters.top_p()));
        if let ParameterConstraint::Choices(choices) = constraint {
            output.push_str(&format!("{}\n", "Allowed values:".dimmed()));
            output.push_str(&format!("  max_tokens  \u{2208} {}\n", Self::join(&choices.max_tokens)));
            output.push_str(&format!("  temperature \u{2208} {}\n", Self::join(&choices.temperature)));
            output.push_str(&format!("  top_p       \u{2208} {}\n", Self::join(&choices.top_p)));
        }
        output
    }

    /// Available models, with the one in use marked.
    pub fn format_models(models: &[Model], current: &Model) -> String {
        let mut output = Self::section_header("Models");
        for model in models {
            let marker = if model == current { "*".green().bold() } else { " ".normal() };
            output.push_str(&format!(" {} {}\n", marker, model));
        }
        if !models.contains(current) {
            output.push_str(&format!(
                "{} {}\n",
                "In use (not listed):".dimmed(),
                current
            ));
        }
        output
    }

    /// The user-facing rendering of any failure.
    pub fn format_error(detail: &dyn std::fmt::Display) -> String {
        format!("{} {}", "An error occurred:".red().bold(), detail)
    }

    fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> String {
        if text.trim().is_empty() {
            placeholder.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn join<T: std::fmt::Display>(values: &[T]) -> String {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!("{}\n{:^50}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
