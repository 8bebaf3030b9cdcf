//! I/O boundary traits for testability
//!
//! These traits abstract the player's console and the source of the case,
//! allowing services to be tested with scripted implementations.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::application::ApplicationResult;
use crate::domain::Case;

/// Line-oriented player console.
pub trait Terminal {
    /// Show `prompt` and read one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write one line of narration.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Source of a playable case (the map loader).
pub trait CaseLoader {
    fn load(&self) -> ApplicationResult<Case>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Console on stdin/stdout.
#[derive(Debug, Default)]
pub struct StdTerminal;

impl StdTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for StdTerminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", prompt.cyan())?;
        stdout.flush()?;

        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(buf)))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", line)
    }
}

/// Remove a trailing `\n` or `\r\n`.
pub fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("left\n".to_string()), "left");
        assert_eq!(strip_line_ending("left\r\n".to_string()), "left");
        assert_eq!(strip_line_ending("left".to_string()), "left");
        assert_eq!(strip_line_ending("\n".to_string()), "");
    }
}
