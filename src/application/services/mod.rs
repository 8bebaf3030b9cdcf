//! Application services
//!
//! Services orchestrate domain logic with terminal I/O.

pub mod investigation;

pub use investigation::{GameOutcome, InvestigationService, PlayOptions};
