//! Investigation service
//!
//! Runs an exploration session against a terminal and judges the final
//! accusation.

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    verdict, Arrival, Case, Command, ExplorationReport, ExplorationSession, Lead, Moves,
    StepOutcome, Verdict,
};
use crate::infrastructure::traits::Terminal;

/// Presentation switches for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    /// List the known suspects before asking for the accusation
    pub list_suspects: bool,
    /// List the available moves at every prompt
    pub show_moves: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            list_suspects: true,
            show_moves: true,
        }
    }
}

/// Result of a complete game.
#[derive(Debug)]
pub struct GameOutcome {
    pub report: ExplorationReport,
    /// `None` when the accusation was cancelled.
    pub verdict: Option<Verdict>,
}

/// Service driving exploration and accusation.
pub struct InvestigationService {
    options: PlayOptions,
}

impl InvestigationService {
    pub fn new(options: PlayOptions) -> Self {
        Self { options }
    }

    /// Explore, then accuse.
    #[instrument(level = "debug", skip_all, fields(case = %case.title))]
    pub fn play(&self, case: &Case, term: &mut dyn Terminal) -> ApplicationResult<GameOutcome> {
        say(term, &format!("=== {} ===", case.title))?;
        say(term, "Explore the map and collect clues. At the end, accuse a suspect.")?;
        say(term, "Commands: 'e' (left), 'd' (right), 's' (exit)")?;

        let report = self.explore(case, term)?;
        let verdict = self.accuse(case, &report, term)?;
        Ok(GameOutcome { report, verdict })
    }

    /// Walk the map until the player exits or input ends.
    #[instrument(level = "debug", skip_all)]
    pub fn explore(&self, case: &Case, term: &mut dyn Terminal) -> ApplicationResult<ExplorationReport> {
        let (mut session, arrival) = ExplorationSession::start(&case.map, &case.suspects)?;
        describe_arrival(term, &arrival)?;

        loop {
            if self.options.show_moves {
                describe_moves(term, session.moves())?;
            }
            let line = match term.read_line("Option:").with_io_context("read command")? {
                Some(line) => line,
                None => {
                    info!("end of input, leaving exploration");
                    say(term, "")?;
                    say(term, "Leaving the exploration.")?;
                    break;
                }
            };

            let command = Command::parse(&line);
            debug!(%command, "command received");
            match session.apply(&command)? {
                StepOutcome::Arrived(arrival) => describe_arrival(term, &arrival)?,
                StepOutcome::InvalidMove(side) => {
                    say(term, &format!("There is no path to the {}.", side))?
                }
                StepOutcome::InvalidCommand(_) => {
                    say(term, "Invalid option. Use 'e', 'd' or 's'.")?
                }
                StepOutcome::Exited => {
                    say(term, "Leaving the exploration.")?;
                    break;
                }
            }
        }

        let report = session.finish();
        say(term, "")?;
        if report.visits.is_empty() {
            say(term, "No locations visited.")?;
        } else {
            say(term, "Locations visited:")?;
            for (n, name) in report.visits.numbered() {
                say(term, &format!("  {}. {}", n, name))?;
            }
        }
        Ok(report)
    }

    /// Ask for an accusation and judge it.
    ///
    /// Returns `None` if the player cancels with an empty line or input ends.
    #[instrument(level = "debug", skip_all)]
    pub fn accuse(
        &self,
        case: &Case,
        report: &ExplorationReport,
        term: &mut dyn Terminal,
    ) -> ApplicationResult<Option<Verdict>> {
        if report.ledger.is_empty() {
            say(term, "")?;
            say(term, "You did not collect enough clues to accuse anyone.")?;
            return Ok(Some(Verdict::NoEvidenceCollected));
        }

        say(term, "")?;
        say(term, "Clues collected (in order):")?;
        for clue in &report.ledger {
            say(term, &format!(" - {}", clue))?;
        }

        if self.options.list_suspects {
            say(term, "")?;
            say(term, "Known suspects:")?;
            match case.suspects.distinct_suspects() {
                Some(suspects) => {
                    for suspect in suspects {
                        say(term, &format!("  - {}", suspect))?;
                    }
                }
                None => say(term, "  (no suspects registered)")?,
            }
        }

        say(term, "")?;
        let accused = term
            .read_line("Who do you accuse? Enter the suspect's name:")
            .with_io_context("read accusation")?
            .map(|line| line.trim().to_string())
            .unwrap_or_default();
        if accused.is_empty() {
            say(term, "No name given. Accusation cancelled.")?;
            return Ok(None);
        }

        let verdict = verdict::decide(&report.ledger, &case.suspects, &accused);
        info!(%accused, %verdict, "accusation judged");
        describe_verdict(term, &accused, &verdict)?;
        Ok(Some(verdict))
    }
}

fn say(term: &mut dyn Terminal, line: &str) -> ApplicationResult<()> {
    term.write_line(line).with_io_context("write to terminal")
}

fn describe_arrival(term: &mut dyn Terminal, arrival: &Arrival) -> ApplicationResult<()> {
    say(term, "")?;
    say(term, &format!("You are in: {}", arrival.location))?;
    match &arrival.sighting {
        Some(sighting) => {
            say(term, &format!("Clue found: \"{}\"", sighting.clue))?;
            match &sighting.lead {
                Lead::Implicates(suspect) => {
                    say(term, &format!("  (This clue points to: {})", suspect))?
                }
                Lead::Unknown => say(term, "  (No known suspect for this clue)")?,
            }
        }
        None => say(term, "No clue in this location.")?,
    }
    Ok(())
}

fn describe_moves(term: &mut dyn Terminal, moves: Moves) -> ApplicationResult<()> {
    say(term, "Choose an option:")?;
    if moves.left {
        say(term, "  (e) Go left")?;
    }
    if moves.right {
        say(term, "  (d) Go right")?;
    }
    say(term, "  (s) Exit the exploration")
}

fn describe_verdict(term: &mut dyn Terminal, accused: &str, verdict: &Verdict) -> ApplicationResult<()> {
    say(term, "")?;
    match verdict {
        Verdict::Guilty { clues, .. } => {
            say(term, &format!("You accused: {}", accused))?;
            say(term, &format!("Clues pointing to this suspect: {}", clues))?;
            say(term, "Verdict: enough evidence. The suspect is found GUILTY.")
        }
        Verdict::InsufficientEvidence { clues, .. } => {
            say(term, &format!("You accused: {}", accused))?;
            say(term, &format!("Clues pointing to this suspect: {}", clues))?;
            say(
                term,
                &format!(
                    "Verdict: insufficient evidence (at least {} clues are needed). The suspect is acquitted.",
                    crate::domain::GUILTY_THRESHOLD
                ),
            )
        }
        Verdict::Unsupported { .. } => {
            say(
                term,
                &format!("The name '{}' matches no suspect with collected clues.", accused),
            )?;
            say(term, "Result: accusation unfounded.")
        }
        Verdict::NoEvidenceCollected => say(term, "You did not collect enough clues to accuse anyone."),
    }
}
