//! Domain-level errors (no external dependencies)

use std::collections::TryReserveError;

use thiserror::Error;

use crate::domain::location::Direction;

/// Domain errors represent violations of the map, ledger and session rules.
/// These are independent of terminal and file concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("location name must not be empty")]
    EmptyLocationName,

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("map already has a root: {0}")]
    RootAlreadySet(String),

    #[error("{side} of {location} is already occupied")]
    SlotOccupied { location: String, side: Direction },

    #[error("no path to the {side} of {location}")]
    NoPath { location: String, side: Direction },

    #[error("map is empty")]
    EmptyMap,

    #[error("exploration already ended")]
    SessionEnded,

    #[error("visit log exhausted after {visits} visits: {source}")]
    VisitLogExhausted {
        visits: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
