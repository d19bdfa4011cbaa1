use crate::domain::board::Side;
use crate::domain::sowing::{apply, Landing, SowOutcome};
use crate::domain::state::{Match, PlayerId};
use crate::domain::test_state_helpers::{make_match, play_out};
use crate::errors::domain::{DomainError, ValidationKind};

fn complete(outcome: SowOutcome) -> (Match, Landing) {
    match outcome {
        SowOutcome::Complete { snapshot, landing } => (snapshot, landing),
        other => panic!("expected a completed move, got {other:?}"),
    }
}

#[test]
fn finishes_on_opponent_pit() {
    let m = make_match([0, 0, 0, 0, 0, 3, 0], [0, 1, 0, 0, 0, 0, 0], false);

    let (after, landing) = complete(apply(5, m).unwrap());

    assert_eq!(landing, Landing::OpponentSide);
    assert_eq!(after.board.row(Side::First), &[0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(after.board.row(Side::Second), &[1, 2, 0, 0, 0, 0, 0]);
}

#[test]
fn skips_opponent_store() {
    let m = make_match([1, 0, 0, 0, 0, 8, 0], [1, 0, 0, 0, 0, 0, 0], false);

    let played = play_out(5, m).unwrap();

    assert_eq!(played.snapshot.board.store(Side::Second), 0);
}

#[test]
fn wraps_around_the_board_more_than_once() {
    let m = make_match([0, 0, 0, 0, 0, 14, 0], [0, 0, 0, 0, 0, 1, 0], false);

    let (after, landing) = complete(apply(5, m).unwrap());

    assert_eq!(landing, Landing::OwnStore);
    assert_eq!(after.board.row(Side::First), &[1, 1, 1, 1, 1, 1, 2]);
    assert_eq!(after.board.row(Side::Second), &[1, 1, 1, 1, 1, 2, 0]);
}

#[test]
fn second_player_sows_from_own_row() {
    let m = make_match([0, 0, 0, 0, 0, 1, 0], [5, 0, 0, 0, 0, 1, 5], true);

    let (after, landing) = complete(apply(5, m).unwrap());

    assert_eq!(landing, Landing::OwnStore);
    assert_eq!(after.board.store(Side::Second), 6);
    assert_eq!(after.board.row(Side::First), &[0, 0, 0, 0, 0, 1, 0]);
}

#[test]
fn chain_continues_then_finishes_on_opponent_side() {
    let m = make_match([0, 0, 0, 0, 1, 1, 0], [0, 0, 0, 0, 0, 1, 0], false);

    let played = play_out(4, m).unwrap();

    assert_eq!(played.steps, 2);
    assert_eq!(played.landing, Landing::OpponentSide);
    assert_eq!(played.snapshot.board.row(Side::First), &[0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(played.snapshot.board.pit(Side::Second, 0), 1);
}

#[test]
fn landing_in_own_store_grants_extra_turn() {
    let m = make_match([0, 0, 0, 0, 0, 1, 0], [1, 0, 0, 0, 0, 0, 0], false);

    let (after, landing) = complete(apply(5, m).unwrap());

    assert!(landing.grants_extra_turn());
    assert_eq!(after.board.store(Side::First), 1);
}

#[test]
fn capture_on_empty_own_pit() {
    let m = make_match([1, 0, 0, 0, 1, 0, 0], [0, 0, 0, 0, 1, 10, 0], false);

    let (after, landing) = complete(apply(4, m).unwrap());

    assert_eq!(
        landing,
        Landing::Capture {
            pit: 5,
            captured: 10
        }
    );
    assert_eq!(after.board.pit(Side::First, 5), 0);
    assert_eq!(after.board.store(Side::First), 11);
    assert_eq!(after.board.pit(Side::Second, 5), 0);
    assert!(!landing.grants_extra_turn());
}

#[test]
fn non_empty_own_pit_continues_from_landing_pit() {
    let m = make_match([2, 0, 3, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0, 0], false);

    match apply(0, m).unwrap() {
        SowOutcome::Continue { pit, snapshot } => {
            assert_eq!(pit, 2);
            assert_eq!(snapshot.board.row(Side::First), &[0, 1, 4, 0, 0, 0, 0]);
        }
        other => panic!("expected a continuation, got {other:?}"),
    }
}

#[test]
fn caller_snapshot_is_untouched() {
    let m = make_match([0, 0, 0, 0, 0, 3, 0], [0, 1, 0, 0, 0, 0, 0], false);
    let before = m.clone();

    let _ = apply(5, m.clone()).unwrap();

    assert_eq!(m, before);
}

#[test]
fn rejects_empty_and_out_of_range_pits() {
    let m = make_match([0, 1, 0, 0, 0, 0, 0], [1, 0, 0, 0, 0, 0, 0], false);

    assert!(matches!(
        apply(0, m.clone()),
        Err(DomainError::Validation(ValidationKind::EmptyPit, _))
    ));
    assert!(matches!(
        apply(6, m),
        Err(DomainError::Validation(ValidationKind::InvalidPit, _))
    ));
}

#[test]
fn rejects_match_without_turn_holder() {
    let m = Match::new(PlayerId::new());

    assert!(matches!(
        apply(0, m),
        Err(DomainError::Validation(ValidationKind::NoActivePlayer, _))
    ));
}
