use std::collections::VecDeque;
use std::env;
use std::io;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::Terminal;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["config", "toml"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Terminal double fed from a list of input lines.
///
/// Running out of lines behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Whole transcript joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn test_scripted_terminal_runs_dry() {
        let mut term = ScriptedTerminal::new(["left"]);
        assert_eq!(term.read_line(">").unwrap(), Some("left".to_string()));
        assert_eq!(term.read_line(">").unwrap(), None);
        assert_eq!(term.prompts.len(), 2);
    }
}
