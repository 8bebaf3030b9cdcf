//! Domain layer: map, ledger, suspect index, session and verdict
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod case;
pub mod command;
pub mod error;
pub mod ledger;
pub mod location;
pub mod session;
pub mod suspects;
pub mod verdict;
pub mod visits;

pub use case::Case;
pub use command::Command;
pub use error::{DomainError, DomainResult};
pub use ledger::ClueLedger;
pub use location::{Direction, Location, LocationId, LocationNode, LocationTree};
pub use session::{
    Arrival, ClueSighting, ExplorationReport, ExplorationSession, Lead, Moves, SessionState,
    StepOutcome,
};
pub use suspects::SuspectIndex;
pub use verdict::{AccusationTally, Verdict, GUILTY_THRESHOLD};
pub use visits::VisitLog;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
