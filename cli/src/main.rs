//! CLI entrypoint for Legal Ease
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use legalease_application::{ConversationLogger, SendMessageUseCase};
use legalease_domain::{ConfigIssue, Model};
use legalease_infrastructure::{
    Ai71Gateway, ConfigLoader, FileConfig, JsonlConversationLogger, resolve_api_key,
};
use legalease_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputConfig, ReplConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    info!("Starting Legal Ease");

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    check_config(&config.validate())?;

    let chat_config = config.to_chat_config();
    info!(
        "Model: {}, history: {}, stream: {}",
        chat_config.model, chat_config.history_mode, chat_config.stream
    );

    // === Dependency Injection ===
    let api_key = resolve_api_key(&config.api)?;
    let gateway = Arc::new(Ai71Gateway::from_config(&config.api, api_key)?);

    let mut use_case = SendMessageUseCase::new(gateway, chat_config);
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(expand_home(path))
    {
        info!("Conversation log: {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        use_case = use_case.with_conversation_logger(logger);
    }

    ConsoleFormatter::set_color(config.output.color);
    let output = OutputConfig {
        show_plain_history: config.output.show_plain_history,
        show_progress: !cli.quiet,
    };
    let repl_config = ReplConfig {
        history_file: config
            .repl
            .history_file
            .as_deref()
            .map(expand_home)
            .or_else(ConfigLoader::default_history_path),
    };

    let mut repl = ChatRepl::new(use_case)
        .with_output(output)
        .with_repl(repl_config);

    // Single message mode
    if let Some(message) = &cli.message {
        let Some(message) = one_shot_message(message) else {
            info!("Blank message, nothing to send");
            return Ok(ExitCode::SUCCESS);
        };
        return Ok(if repl.send(message).await {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    repl.run().await?;
    Ok(ExitCode::SUCCESS)
}

/// Initialize logging based on verbosity level, with an optional file sink.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| anyhow!("Cannot create log directory {}: {}", dir.display(), e))?;
            let appender = tracing_appender::rolling::daily(dir, "legalease.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// CLI flags take precedence over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        let Ok(model) = model.parse::<Model>();
        config.model.name = model;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.generation.max_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        config.generation.temperature = temperature;
    }
    if let Some(top_p) = cli.top_p {
        config.generation.top_p = top_p;
    }
    if let Some(mode) = cli.history {
        config.chat.history_mode = mode.as_str().to_string();
    }
    if let Some(window) = cli.window {
        config.chat.history_window = Some(window);
    }
    if let Some(system) = &cli.system {
        config.chat.system_instruction = Some(system.clone());
    }
    if cli.stream {
        config.chat.stream = true;
    }
    if cli.plain {
        config.output.show_plain_history = true;
    }
}

/// Print warnings and fail on errors.
fn check_config(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("Configuration: {}", issue);
        eprintln!("Warning: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

/// The message to send in one-shot mode. Blank input sends nothing.
fn one_shot_message(message: &str) -> Option<&str> {
    (!message.trim().is_empty()).then_some(message)
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_one_shot_message_is_skipped() {
        assert_eq!(one_shot_message("  \n\t"), None);
        assert_eq!(one_shot_message(""), None);
        assert_eq!(one_shot_message("Is a verbal will valid?"), Some("Is a verbal will valid?"));
    }

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli::parse_from(["legalease", "--history", "paired", "--max-tokens", "256"]);
        let mut config = FileConfig::default();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.chat.history_mode, "paired");
        assert_eq!(config.generation.max_tokens, 256);
    }
}
