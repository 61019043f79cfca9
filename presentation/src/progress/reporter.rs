//! Progress reporting while waiting for a reply

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use legalease_application::ports::progress::ChatProgressNotifier;
use legalease_domain::Model;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const WAITING_MESSAGE: &str = "Generating response...";

/// Shows a spinner until the reply arrives and prints streamed fragments
/// as they come in.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    show_spinner: bool,
    streamed: AtomicBool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_spinner: true,
            streamed: AtomicBool::new(false),
        }
    }

    /// Print streamed fragments but no spinner (for `--quiet`).
    pub fn quiet() -> Self {
        Self {
            show_spinner: false,
            ..Self::new()
        }
    }

    /// Whether any fragment was printed during the last request.
    pub fn streamed(&self) -> bool {
        self.streamed.load(Ordering::Relaxed)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatProgressNotifier for ProgressReporter {
    fn on_request_start(&self, _model: &Model, _message_count: usize) {
        self.streamed.store(false, Ordering::Relaxed);
        if !self.show_spinner {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(WAITING_MESSAGE);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_chunk(&self, chunk: &str) {
        if !self.streamed.swap(true, Ordering::Relaxed) {
            self.clear_spinner();
            print!("{} ", "Legal Ease:".cyan().bold());
        }
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
    }

    fn on_request_end(&self, _success: bool) {
        self.clear_spinner();
        if self.streamed() {
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_flag_resets_per_request() {
        let reporter = ProgressReporter::quiet();
        reporter.on_request_start(&Model::default(), 1);
        assert!(!reporter.streamed());
        reporter.on_chunk("Hel");
        reporter.on_chunk("lo");
        assert!(reporter.streamed());
        reporter.on_request_end(true);

        reporter.on_request_start(&Model::default(), 1);
        assert!(!reporter.streamed());
        reporter.on_request_end(false);
    }

    #[test]
    fn test_spinner_cleared_on_end() {
        let reporter = ProgressReporter::new();
        reporter.on_request_start(&Model::default(), 2);
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_request_end(true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
