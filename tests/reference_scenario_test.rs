//! End-to-end walks through the built-in mansion.

use rstest::{fixture, rstest};

use dquest::domain::{
    verdict, Case, Command, ExplorationSession, Lead, SessionState, StepOutcome, Verdict,
};
use dquest::infrastructure::{BuiltinCase, CaseLoader};
use dquest::util::testing::init_test_setup;

#[fixture]
fn mansion() -> Case {
    init_test_setup();
    BuiltinCase.load().expect("built-in case")
}

fn walk<'a>(case: &'a Case, commands: &[&str]) -> ExplorationSession<'a> {
    let (mut session, _) = ExplorationSession::start(&case.map, &case.suspects).unwrap();
    for line in commands {
        session.apply(&Command::parse(line)).unwrap();
    }
    session
}

#[rstest]
fn given_right_left_exit_when_walking_then_visits_and_ledger_match(mansion: Case) {
    let session = walk(&mansion, &["d", "e", "s"]);
    assert_eq!(session.state(), SessionState::Exited);

    let report = session.finish();
    assert_eq!(report.visits.names(), vec!["Hall", "Corridor", "Bedroom"]);
    assert_eq!(
        report.ledger.enumerate_in_order(),
        vec!["Muddy footprints", "Stained sheet"]
    );
}

#[rstest]
fn given_reference_walk_when_accusing_butler_then_insufficient(mansion: Case) {
    let report = walk(&mansion, &["right", "left", "exit"]).finish();
    assert_eq!(
        verdict::decide(&report.ledger, &mansion.suspects, "Butler"),
        Verdict::InsufficientEvidence {
            suspect: "Butler".to_string(),
            clues: 1
        }
    );
}

#[rstest]
fn given_reference_walk_when_accusing_gardener_then_insufficient(mansion: Case) {
    let report = walk(&mansion, &["d", "e", "s"]).finish();
    let verdict = verdict::decide(&report.ledger, &mansion.suspects, "Gardener");
    assert!(!verdict.is_guilty());
    assert_eq!(
        verdict,
        Verdict::InsufficientEvidence {
            suspect: "Gardener".to_string(),
            clues: 1
        }
    );
}

#[rstest]
fn given_reference_walk_when_accusing_librarian_then_unsupported(mansion: Case) {
    let report = walk(&mansion, &["d", "e", "s"]).finish();
    assert_eq!(
        verdict::decide(&report.ledger, &mansion.suspects, "Librarian"),
        Verdict::Unsupported {
            accused: "Librarian".to_string()
        }
    );
}

#[rstest]
fn given_garden_walk_when_accusing_gardener_then_guilty(mansion: Case) {
    // Hall (footprints) then Garden (drawer): both bound to the Gardener
    let report = walk(&mansion, &["d", "d", "s"]).finish();
    assert_eq!(
        verdict::decide(&report.ledger, &mansion.suspects, "gardener"),
        Verdict::Guilty {
            suspect: "Gardener".to_string(),
            clues: 2
        }
    );
}

#[rstest]
fn given_leaf_when_moving_then_invalid_move_and_log_unchanged(mansion: Case) {
    let mut session = walk(&mansion, &["e", "e"]);
    assert_eq!(session.visits().names(), vec!["Hall", "Parlor", "Kitchen"]);

    let outcome = session.apply(&Command::parse("d")).unwrap();
    assert!(matches!(outcome, StepOutcome::InvalidMove(_)));
    assert_eq!(session.visits().len(), 3);
    assert_eq!(session.current().unwrap().name(), "Kitchen");
    assert_eq!(session.state(), SessionState::Exploring);
}

#[rstest]
fn given_root_when_starting_then_root_clue_collected(mansion: Case) {
    let (session, arrival) = ExplorationSession::start(&mansion.map, &mansion.suspects).unwrap();
    assert_eq!(arrival.location, "Hall");
    let sighting = arrival.sighting.expect("hall has a clue");
    assert_eq!(sighting.lead, Lead::Implicates("Gardener".to_string()));
    assert!(sighting.newly_collected);
    assert!(session.ledger().contains("Muddy footprints"));
}

#[rstest]
fn given_revisited_clue_when_walking_then_ledger_has_no_duplicates(mansion: Case) {
    // the same clue lies in two rooms
    let mut map = dquest::domain::LocationTree::new();
    let root = map
        .set_root(dquest::domain::Location::build("Porch", Some("Ash")).unwrap())
        .unwrap();
    map.attach_left(root, dquest::domain::Location::build("Shed", Some("Ash")).unwrap())
        .unwrap();
    let case = Case::new("Twice", map, mansion.suspects);

    let report = walk(&case, &["e", "s"]).finish();
    assert_eq!(report.visits.len(), 2);
    assert_eq!(report.ledger.len(), 1);
}

#[rstest]
fn given_exited_session_when_applying_then_session_ended(mansion: Case) {
    let mut session = walk(&mansion, &["s"]);
    let err = session.apply(&Command::parse("e")).unwrap_err();
    assert_eq!(err, dquest::domain::DomainError::SessionEnded);
}

#[rstest]
fn given_map_when_tearing_down_then_all_rooms_released(mansion: Case) {
    let mut map = mansion.map;
    assert_eq!(map.teardown(), 7);
    assert!(map.is_empty());
    assert!(map.root().is_none());
}
