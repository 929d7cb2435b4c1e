//! Output formatting for the CLI
//!
//! Human-readable output is colored unless disabled. In JSON mode only
//! structured payloads go to stdout; notices are suppressed and errors go to
//! stderr.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formatter shared by all command handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a success notice
    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{}", message.green());
        }
    }

    /// Print a plain notice
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        eprintln!("{}", format!("Warning: {message}").yellow());
    }

    /// Print an error to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{}", format!("Error: {message}").red().bold());
    }

    /// Print a value as pretty JSON regardless of mode
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        self.json(value)
    }

    /// Print a dimmed detail line
    pub fn detail(&self, message: &str) {
        if !self.json {
            println!("    {}", message.dimmed());
        }
    }
}
