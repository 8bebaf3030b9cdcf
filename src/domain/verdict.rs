//! Accusation tally and judgment.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::ledger::ClueLedger;
use crate::domain::suspects::SuspectIndex;

/// Distinct clues needed to convict. Fixed by the game rules.
pub const GUILTY_THRESHOLD: usize = 2;

/// Number of collected clues implicating each suspect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccusationTally {
    counts: HashMap<String, usize>,
}

impl AccusationTally {
    /// Count, per suspect, the ledgered clues bound to them. Unbound clues
    /// count for nobody.
    #[instrument(level = "debug", skip_all)]
    pub fn from_evidence(ledger: &ClueLedger, index: &SuspectIndex) -> Self {
        let mut counts = HashMap::new();
        for clue in ledger {
            match index.get(clue) {
                Some(suspect) => *counts.entry(suspect.to_string()).or_insert(0) += 1,
                None => debug!(clue, "clue implicates nobody"),
            }
        }
        Self { counts }
    }

    pub fn count_for(&self, suspect: &str) -> Option<usize> {
        self.counts.get(suspect).copied()
    }

    /// Entries sorted by suspect name.
    pub fn entries(&self) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .sorted()
            .collect()
    }

    /// Match `accused` ignoring case. When several names differ only in case,
    /// the first in sorted order answers alone; counts are never merged.
    fn lookup(&self, accused: &str) -> Option<(&str, usize)> {
        let folded = accused.to_lowercase();
        self.entries()
            .into_iter()
            .find(|(name, _)| name.to_lowercase() == folded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Guilty { suspect: String, clues: usize },
    InsufficientEvidence { suspect: String, clues: usize },
    /// Nobody with collected clues answers to that name.
    Unsupported { accused: String },
    NoEvidenceCollected,
}

impl Verdict {
    pub fn is_guilty(&self) -> bool {
        matches!(self, Verdict::Guilty { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Guilty { suspect, clues } => {
                write!(f, "{} is GUILTY ({} clues)", suspect, clues)
            }
            Verdict::InsufficientEvidence { suspect, clues } => write!(
                f,
                "insufficient evidence against {} ({} of {} clues needed)",
                suspect, clues, GUILTY_THRESHOLD
            ),
            Verdict::Unsupported { accused } => {
                write!(f, "'{}' is not implicated by any collected clue", accused)
            }
            Verdict::NoEvidenceCollected => write!(f, "no evidence collected"),
        }
    }
}

/// Judge an accusation against a tally.
#[instrument(level = "debug", skip(tally))]
pub fn judge(tally: &AccusationTally, accused: &str) -> Verdict {
    match tally.lookup(accused) {
        None => Verdict::Unsupported {
            accused: accused.to_string(),
        },
        Some((suspect, clues)) if clues >= GUILTY_THRESHOLD => Verdict::Guilty {
            suspect: suspect.to_string(),
            clues,
        },
        Some((suspect, clues)) => Verdict::InsufficientEvidence {
            suspect: suspect.to_string(),
            clues,
        },
    }
}

/// Full verdict procedure: an empty ledger short-circuits before tallying.
pub fn decide(ledger: &ClueLedger, index: &SuspectIndex, accused: &str) -> Verdict {
    if ledger.is_empty() {
        return Verdict::NoEvidenceCollected;
    }
    judge(&AccusationTally::from_evidence(ledger, index), accused)
}
