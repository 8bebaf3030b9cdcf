//! Detective quest: walk a binary map of rooms, collect clues into an
//! ordered ledger and accuse a suspect once the exploration ends.
//!
//! Layers:
//! - [`domain`]: map, ledger, suspect index, session and verdict (no I/O)
//! - [`application`]: the investigation service driving a [`infrastructure::Terminal`]
//! - [`infrastructure`]: console and case loaders
//! - [`cli`]: argument parsing and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
