//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary traits: console and case loading.

pub mod loader;
pub mod traits;

pub use loader::{BuiltinCase, TomlCaseLoader};
pub use traits::{CaseLoader, StdTerminal, Terminal};
