//! Append-only record of visited locations.

use crate::domain::error::{DomainError, DomainResult};

/// Location names in arrival order. Revisits are recorded again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitLog {
    entries: Vec<String>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visit; running out of memory ends the session.
    pub fn record(&mut self, name: &str) -> DomainResult<()> {
        self.entries
            .try_reserve(1)
            .map_err(|source| DomainError::VisitLogExhausted {
                visits: self.entries.len(),
                source,
            })?;
        self.entries.push(name.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    /// Visits numbered from 1.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, name)| (i + 1, name.as_str()))
    }
}
