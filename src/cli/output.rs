//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying spinners,
//! status-prefixed messages and errors, honouring `--quiet` and `--json`.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output preferences taken from the global CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Machine-readable JSON output
    pub json: bool,
    /// Verbosity level (-v count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Make this configuration visible to the `print_*` helpers
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }

    /// Tracing filter directive matching the verbosity
    pub fn log_directive(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Whether `--quiet` is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether `--json` is active
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

fn human_output() -> bool {
    !is_quiet() && !is_json()
}

/// Print a success line
pub fn print_success(message: &str) {
    if human_output() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print an informational line
pub fn print_info(message: &str) {
    if human_output() {
        println!("{} {message}", status::INFO);
    }
}

/// Print a warning line to stderr
pub fn print_warning(message: &str) {
    if !is_json() {
        eprintln!("{} {message}", status::WARNING);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if human_output() {
        println!("  {message}");
    }
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    if is_json() {
        let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        let json = serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "causes": causes,
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return;
    }

    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

/// Create a spinner for work that runs with captured output
///
/// Hidden when stderr is not a terminal or in quiet/JSON mode.
pub fn create_spinner(message: &str) -> ProgressBar {
    if !human_output() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_follows_verbosity() {
        assert_eq!(OutputConfig::new(false, false, 0).log_directive(), tracing::Level::WARN);
        assert_eq!(OutputConfig::new(false, false, 1).log_directive(), tracing::Level::INFO);
        assert_eq!(OutputConfig::new(false, false, 3).log_directive(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_json_mode_hides_spinner() {
        OutputConfig::new(false, true, 0).apply_global();
        assert!(is_json());
        assert!(create_spinner("Checking build tools").is_hidden());
        OutputConfig::default().apply_global();
    }
}
