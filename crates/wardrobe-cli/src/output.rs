//! Output formatting for the CLI.
//!
//! Results go to stdout, everything else to stderr.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use wardrobe_engine::Warning;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Level for a number of `-v` flags
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Output handler for CLI
pub struct Output {
    out: Term,
    err: Term,
    verbosity: Verbosity,
    json_mode: bool,
}

impl Output {
    pub fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            verbosity: Verbosity::Normal,
            json_mode: false,
        }
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Enable JSON output mode
    pub fn set_json_mode(&mut self, json: bool) {
        self.json_mode = json;
    }

    /// Check if chatter should be shown at given verbosity
    fn should_output(&self, min_verbosity: Verbosity) -> bool {
        !self.json_mode && self.verbosity >= min_verbosity
    }

    /// Write a result line to stdout
    pub fn result(&self, message: &str) {
        let _ = writeln!(&self.out, "{}", message);
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.err, "{}", style(message).cyan());
        }
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.err, "{}", style(message).green());
        }
    }

    /// Write a warning message, shown unless quiet
    pub fn warning(&self, message: &str) {
        if self.verbosity > Verbosity::Quiet {
            let _ = writeln!(&self.err, "{} {}", style("Warning:").yellow().bold(), message);
        }
    }

    pub fn warnings(&self, warnings: &[Warning]) {
        for warning in warnings {
            self.warning(&warning.to_string());
        }
    }

    /// Write a verbose message
    pub fn verbose(&self, message: &str) {
        if self.should_output(Verbosity::Verbose) {
            let _ = writeln!(&self.err, "{}", style(message).dim());
        }
    }

    /// Write a section header
    pub fn section(&self, title: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.out, "{}", style(title).bold().underlined());
        }
    }

    /// Write a table row to stdout
    pub fn table_row(&self, columns: &[&str], widths: &[usize]) {
        let mut line = String::new();
        for (i, col) in columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(20);
            line.push_str(&format!("{:<width$}", col, width = width));
        }
        let _ = writeln!(&self.out, "{}", line.trim_end());
    }

    /// Write JSON output
    pub fn json<T: serde::Serialize>(&self, data: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let _ = writeln!(&self.out, "{}", json);
        Ok(())
    }

    /// Spinner for indeterminate work, hidden when stderr is not a terminal
    pub fn spinner(&self, message: &str, enabled: bool) -> ProgressBar {
        if !enabled || !self.should_output(Verbosity::Normal) || !self.err.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_json(&self) -> bool {
        self.json_mode
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_from_occurrences() {
        assert_eq!(Verbosity::from_occurrences(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_occurrences(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_occurrences(4), Verbosity::Debug);
    }

    #[test]
    fn test_output_creation() {
        let mut output = Output::new();
        assert!(!output.is_quiet());
        assert!(!output.is_json());

        output.set_json_mode(true);
        output.set_verbosity(Verbosity::Quiet);
        assert!(output.is_quiet());
        assert!(output.is_json());
    }

    #[test]
    fn test_spinner_hidden_in_json_mode() {
        let mut output = Output::new();
        output.set_json_mode(true);
        assert!(output.spinner("working", true).is_hidden());
    }
}
