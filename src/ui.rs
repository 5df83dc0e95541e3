//! UI module for styled terminal output.
//!
//! Provides colored status lines in normal mode and stays quiet in verbose
//! mode, where tracing already reports each step. Also hosts the interactive
//! overwrite prompt.

use crate::clone::OverwritePrompt;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        let colors_enabled = should_use_colors();
        Self {
            colors_enabled,
            verbose,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stderr().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
    reader: Box<dyn BufRead>,
}

impl Ui {
    /// Create a new UI writing to stderr and reading answers from stdin
    pub fn new(config: UiConfig) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stderr()),
            reader: Box::new(io::BufReader::new(io::stdin())),
        }
    }

    /// Create UI with custom streams (for testing)
    pub fn with_io(config: UiConfig, writer: Box<dyn Write>, reader: Box<dyn BufRead>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer,
            reader,
        }
    }

    /// Print a step in progress
    pub fn step(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", format!("{}...", msg).dimmed());
        } else {
            let _ = writeln!(self.writer, "{}...", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        // Errors shown in both modes
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Ask a yes/no question; anything but `y`/`yes` (or end of input) is no
    pub fn confirm(&mut self, question: &str) -> bool {
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{} {} ", question.bold(), "[y/N]".dimmed());
        } else {
            let _ = write!(self.writer, "{} [y/N] ", question);
        }
        let _ = self.writer.flush();

        let mut answer = String::new();
        match self.reader.read_line(&mut answer) {
            Ok(0) | Err(_) => {
                let _ = writeln!(self.writer);
                false
            }
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

impl OverwritePrompt for Ui {
    fn confirm_overwrite(&mut self, file_name: &str, _path: &Path) -> bool {
        self.confirm(&format!(
            "A file named '{}' already exists in the destination.\n\
             Do you want to overwrite it?",
            file_name
        ))
    }
}
