//! CLI command definitions

use clap::Parser;
use legalease_domain::HistoryInclusionMode;
use std::path::PathBuf;

/// CLI arguments for legalease
#[derive(Parser, Debug)]
#[command(name = "legalease")]
#[command(author, version, about = "Legal Ease - a terminal legal-information assistant on AI71")]
#[command(long_about = r#"
Legal Ease answers legal questions using a hosted Falcon model on AI71.

Without MESSAGE an interactive chat starts; with MESSAGE a single question
is sent and the reply printed.

The API key is read from the AI71_API_KEY environment variable (or the
variable named by [api].api_key_env).

Configuration files are loaded from (in priority order):
1. LEGALEASE_* environment variables (e.g. LEGALEASE_CHAT__HISTORY_MODE=paired)
2. --config <path>        Explicit config file
3. ./legalease.toml       Project-level config
4. ~/.config/legalease/config.toml   Global config

Example:
  legalease "Can my landlord keep my deposit for normal wear and tear?"
  legalease --history paired --window 10
  legalease --stream --system "Answer briefly and cite the relevant doctrine."
"#)]
pub struct Cli {
    /// A single question to ask (starts the interactive chat when omitted)
    pub message: Option<String>,

    /// Model identifier (e.g. tiiuae/falcon-180B-chat)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum number of tokens to generate
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f64>,

    /// Nucleus sampling threshold in [0, 1]
    #[arg(long, value_name = "P")]
    pub top_p: Option<f64>,

    /// History sent with each request: none, flat or paired
    #[arg(long, value_name = "MODE", value_parser = parse_history_mode)]
    pub history: Option<HistoryInclusionMode>,

    /// Send at most the last N stored turns
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,

    /// System instruction prepended to every request
    #[arg(long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Print the reply as it is generated
    #[arg(long)]
    pub stream: bool,

    /// Show the (question, answer) pair view after each reply
    #[arg(long)]
    pub plain: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

fn parse_history_mode(s: &str) -> Result<HistoryInclusionMode, String> {
    s.parse().map_err(|e: legalease_domain::DomainError| e.to_string())
}
