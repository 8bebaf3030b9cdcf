//! Error conversion helpers for terminal I/O
//!
//! Provides an extension trait for cleaner error handling with context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// term.read_line("> ").with_io_context("read command")?;
    /// ```
    fn with_io_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_io_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
