//! Player commands of the exploration prompt.

use std::fmt;

use crate::domain::location::Direction;

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// Matching ignores case and leading whitespace. Full words (`left`, `right`,
    /// `exit`) win; otherwise the first character decides: `e` left,
    /// `d` right, `s` exit.
    pub fn parse(line: &str) -> Self {
        let token = line.trim().to_lowercase();
        match token.as_str() {
            "left" => return Command::Move(Direction::Left),
            "right" => return Command::Move(Direction::Right),
            "exit" => return Command::Exit,
            _ => {}
        }
        match token.chars().next() {
            Some('e') => Command::Move(Direction::Left),
            Some('d') => Command::Move(Direction::Right),
            Some('s') => Command::Exit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(side) => write!(f, "{}", side),
            Command::Exit => write!(f, "exit"),
            Command::Unknown(raw) => write!(f, "{:?}", raw),
        }
    }
}
