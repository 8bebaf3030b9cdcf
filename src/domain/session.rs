//! Exploration state machine.
//!
//! A session starts `Exploring` at the map root and only leaves that state
//! through an explicit exit. Leaves do not end the walk: from a leaf the only
//! valid command is `exit`.

use tracing::{debug, info, instrument};

use crate::domain::command::Command;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ledger::ClueLedger;
use crate::domain::location::{Direction, Location, LocationId, LocationTree};
use crate::domain::suspects::SuspectIndex;
use crate::domain::visits::VisitLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Exploring,
    Exited,
}

/// Who a clue points at, as far as the suspect index knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lead {
    Implicates(String),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueSighting {
    pub clue: String,
    /// `false` when the clue was already in the ledger
    pub newly_collected: bool,
    pub lead: Lead,
}

/// Moves available from a location (exit is always available).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moves {
    pub left: bool,
    pub right: bool,
}

impl Moves {
    pub fn is_dead_end(&self) -> bool {
        !self.left && !self.right
    }
}

/// What the player sees when entering a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub location: String,
    pub sighting: Option<ClueSighting>,
    pub moves: Moves,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Arrived(Arrival),
    /// No child on that side; cursor and visit log are unchanged.
    InvalidMove(Direction),
    InvalidCommand(String),
    Exited,
}

/// Everything an exploration leaves behind for the verdict.
#[derive(Debug)]
pub struct ExplorationReport {
    pub visits: VisitLog,
    pub ledger: ClueLedger,
}

#[derive(Debug)]
pub struct ExplorationSession<'a> {
    tree: &'a LocationTree,
    index: &'a SuspectIndex,
    cursor: LocationId,
    state: SessionState,
    visits: VisitLog,
    ledger: ClueLedger,
}

impl<'a> ExplorationSession<'a> {
    /// Start at the root, which counts as the first visit.
    #[instrument(level = "debug", skip_all)]
    pub fn start(tree: &'a LocationTree, index: &'a SuspectIndex) -> DomainResult<(Self, Arrival)> {
        let root = tree.root().ok_or(DomainError::EmptyMap)?;
        let mut session = Self {
            tree,
            index,
            cursor: root,
            state: SessionState::Exploring,
            visits: VisitLog::new(),
            ledger: ClueLedger::new(),
        };
        let arrival = session.enter(root)?;
        Ok((session, arrival))
    }

    /// Feed one command into the state machine.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, command: &Command) -> DomainResult<StepOutcome> {
        if self.state == SessionState::Exited {
            return Err(DomainError::SessionEnded);
        }

        match command {
            Command::Move(side) => match self.tree.child(self.cursor, *side) {
                Some(next) => {
                    let arrival = self.enter(next)?;
                    Ok(StepOutcome::Arrived(arrival))
                }
                None => {
                    debug!(%side, "no path from current location");
                    Ok(StepOutcome::InvalidMove(*side))
                }
            },
            Command::Exit => {
                self.state = SessionState::Exited;
                info!("exploration ended after {} visits", self.visits.len());
                Ok(StepOutcome::Exited)
            }
            Command::Unknown(raw) => Ok(StepOutcome::InvalidCommand(raw.clone())),
        }
    }

    fn enter(&mut self, idx: LocationId) -> DomainResult<Arrival> {
        let location = self.tree.location(idx)?;
        self.cursor = idx;
        self.visits.record(location.name())?;

        let sighting = location.clue().map(|clue| {
            let newly_collected = self.ledger.insert(clue);
            let lead = match self.index.get(clue) {
                Some(suspect) => Lead::Implicates(suspect.to_string()),
                None => Lead::Unknown,
            };
            debug!(clue, newly_collected, ?lead, "clue sighted");
            ClueSighting {
                clue: clue.to_string(),
                newly_collected,
                lead,
            }
        });

        Ok(Arrival {
            location: location.name().to_string(),
            sighting,
            moves: self.moves(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cursor(&self) -> LocationId {
        self.cursor
    }

    pub fn current(&self) -> DomainResult<&'a Location> {
        self.tree.location(self.cursor)
    }

    pub fn moves(&self) -> Moves {
        Moves {
            left: self.tree.has_left(self.cursor),
            right: self.tree.has_right(self.cursor),
        }
    }

    pub fn visits(&self) -> &VisitLog {
        &self.visits
    }

    pub fn ledger(&self) -> &ClueLedger {
        &self.ledger
    }

    /// Hand over the visit log and ledger. A session still exploring is
    /// treated as exited (end of input).
    pub fn finish(self) -> ExplorationReport {
        ExplorationReport {
            visits: self.visits,
            ledger: self.ledger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_map() -> (LocationTree, SuspectIndex) {
        let mut tree = LocationTree::new();
        let root = tree
            .set_root(Location::build("Hall", Some("Muddy footprints")).unwrap())
            .unwrap();
        tree.attach_right(root, Location::build("Corridor", None).unwrap())
            .unwrap();
        let index: SuspectIndex = [("Muddy footprints", "Gardener")].into_iter().collect();
        (tree, index)
    }

    #[test]
    fn test_start_visits_root() {
        let (tree, index) = corridor_map();
        let (session, arrival) = ExplorationSession::start(&tree, &index).unwrap();
        assert_eq!(arrival.location, "Hall");
        assert_eq!(
            arrival.sighting,
            Some(ClueSighting {
                clue: "Muddy footprints".to_string(),
                newly_collected: true,
                lead: Lead::Implicates("Gardener".to_string()),
            })
        );
        assert_eq!(arrival.moves, Moves { left: false, right: true });
        assert_eq!(session.visits().names(), vec!["Hall"]);
        assert_eq!(session.state(), SessionState::Exploring);
    }

    #[test]
    fn test_start_on_empty_map_fails() {
        let tree = LocationTree::new();
        let index = SuspectIndex::new();
        assert_eq!(
            ExplorationSession::start(&tree, &index).unwrap_err(),
            DomainError::EmptyMap
        );
    }

    #[test]
    fn test_invalid_move_leaves_state_unchanged() {
        let (tree, index) = corridor_map();
        let (mut session, _) = ExplorationSession::start(&tree, &index).unwrap();
        let cursor = session.cursor();

        let outcome = session.apply(&Command::Move(Direction::Left)).unwrap();

        assert_eq!(outcome, StepOutcome::InvalidMove(Direction::Left));
        assert_eq!(session.cursor(), cursor);
        assert_eq!(session.visits().len(), 1);
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let (tree, index) = corridor_map();
        let (mut session, _) = ExplorationSession::start(&tree, &index).unwrap();
        let outcome = session.apply(&Command::parse("jump")).unwrap();
        assert_eq!(outcome, StepOutcome::InvalidCommand("jump".to_string()));
        assert_eq!(session.state(), SessionState::Exploring);
    }

    #[test]
    fn test_leaf_does_not_end_session() {
        let (tree, index) = corridor_map();
        let (mut session, _) = ExplorationSession::start(&tree, &index).unwrap();
        match session.apply(&Command::Move(Direction::Right)).unwrap() {
            StepOutcome::Arrived(arrival) => {
                assert_eq!(arrival.location, "Corridor");
                assert!(arrival.sighting.is_none());
                assert!(arrival.moves.is_dead_end());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Exploring);
        assert_eq!(
            session.apply(&Command::Move(Direction::Right)).unwrap(),
            StepOutcome::InvalidMove(Direction::Right)
        );
        assert_eq!(session.apply(&Command::Exit).unwrap(), StepOutcome::Exited);
        assert_eq!(session.state(), SessionState::Exited);
    }

    #[test]
    fn test_commands_after_exit_are_rejected() {
        let (tree, index) = corridor_map();
        let (mut session, _) = ExplorationSession::start(&tree, &index).unwrap();
        session.apply(&Command::Exit).unwrap();
        assert_eq!(
            session.apply(&Command::Move(Direction::Right)),
            Err(DomainError::SessionEnded)
        );
    }

    #[test]
    fn test_finish_hands_over_visits_and_ledger() {
        let (tree, index) = corridor_map();
        let (mut session, _) = ExplorationSession::start(&tree, &index).unwrap();
        session.apply(&Command::Move(Direction::Right)).unwrap();
        session.apply(&Command::Exit).unwrap();
        let report = session.finish();
        assert_eq!(report.visits.names(), vec!["Hall", "Corridor"]);
        assert_eq!(report.ledger.enumerate_in_order(), vec!["Muddy footprints"]);
    }
}
