//! Clue to suspect bindings.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

/// Maps a clue to the suspect it implicates. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspectIndex {
    bindings: HashMap<String, String>,
}

impl SuspectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `clue` to `suspect`, returning the suspect it was previously bound to.
    pub fn put(&mut self, clue: impl Into<String>, suspect: impl Into<String>) -> Option<String> {
        let clue = clue.into();
        let previous = self.bindings.insert(clue.clone(), suspect.into());
        if let Some(previous) = &previous {
            debug!("rebound clue {:?} (was {:?})", clue, previous);
        }
        previous
    }

    pub fn get(&self, clue: &str) -> Option<&str> {
        self.bindings.get(clue).map(String::as_str)
    }

    /// Every suspect bound by at least one clue, or `None` if nothing is bound.
    pub fn distinct_suspects(&self) -> Option<BTreeSet<&str>> {
        if self.bindings.is_empty() {
            return None;
        }
        Some(self.bindings.values().map(String::as_str).collect())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SuspectIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (clue, suspect) in iter {
            index.bindings.insert(clue.into(), suspect.into());
        }
        index
    }
}
