//! Colored terminal output for the non-interactive commands
//!
//! `colored` honours NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::Verdict;

/// `error:` prefix in red, to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Case title or section name
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line closing summary of a game: green when the case is closed,
/// red when the accused walks free, yellow when nobody was accused.
pub fn verdict(verdict: Option<&Verdict>) {
    match verdict {
        Some(v) if v.is_guilty() => println!("{} Case closed: {}", "✓".green(), v),
        Some(v) => println!("{} Case open: {}", "✗".red(), v),
        None => println!("{} No accusation made", "?".yellow()),
    }
}

/// Sorted suspect names, or a placeholder when none are bound.
pub fn suspects<'a>(names: Option<impl IntoIterator<Item = &'a str>>) {
    match names {
        Some(names) => names.into_iter().for_each(|name| detail(&format!("- {}", name))),
        None => detail("(no suspects registered)"),
    }
}
