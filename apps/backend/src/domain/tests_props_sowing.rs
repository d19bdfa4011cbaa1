//! Property tests for sowing (pure domain, no pipeline).
//!
//! Properties tested:
//! - Every sowing step conserves the stones on the board
//! - A capture empties both mirrored pits and banks at least captured + 1
//! - A whole move settles within as many steps as there are stones
//! - Continuations always point at a non-empty own pit

use proptest::prelude::*;

use crate::domain::board::{Side, PITS};
use crate::domain::sowing::{apply, Landing, SowOutcome};
use crate::domain::test_gens::match_with_legal_pit;
use crate::domain::test_state_helpers::play_out;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Property: total stones are unchanged by any single step
    #[test]
    fn prop_step_conserves_stones((m, pit) in match_with_legal_pit()) {
        let before = m.board.total_stones();

        let after = match apply(pit, m).unwrap() {
            SowOutcome::Continue { snapshot, .. } => snapshot,
            SowOutcome::Complete { snapshot, .. } => snapshot,
        };

        prop_assert_eq!(after.board.total_stones(), before);
    }

    /// Property: capture clears both pits and banks the captured stones plus one
    #[test]
    fn prop_capture_accounting((m, pit) in match_with_legal_pit()) {
        let side = m.acting_side().unwrap();
        let store_before = m.board.store(side);

        if let SowOutcome::Complete { snapshot, landing: Landing::Capture { pit: landed, captured } } =
            apply(pit, m).unwrap()
        {
            prop_assert_eq!(snapshot.board.pit(side, landed), 0);
            prop_assert_eq!(snapshot.board.pit(side.opponent(), landed), 0);
            prop_assert!(
                u32::from(snapshot.board.store(side))
                    >= u32::from(store_before) + u32::from(captured) + 1
            );
        }
    }

    /// Property: a whole move settles within as many steps as there are stones
    #[test]
    fn prop_chain_is_bounded((m, pit) in match_with_legal_pit()) {
        let total = m.board.total_stones() as usize;

        let played = play_out(pit, m).unwrap();

        prop_assert!(played.steps <= total, "{} steps for {} stones", played.steps, total);
        prop_assert_eq!(played.snapshot.board.total_stones() as usize, total);
    }

    /// Property: a continuation resumes from a loaded pit on the mover's own row
    #[test]
    fn prop_continuation_targets_loaded_own_pit((m, pit) in match_with_legal_pit()) {
        let side = m.acting_side().unwrap();

        if let SowOutcome::Continue { pit: next, snapshot } = apply(pit, m).unwrap() {
            prop_assert!(next < PITS);
            prop_assert!(snapshot.board.pit(side, next) >= 2);
            prop_assert_eq!(snapshot.acting_side(), Some(side));
        }
    }

    /// Property: the opponent's store never changes during a move
    #[test]
    fn prop_opponent_store_untouched((m, pit) in match_with_legal_pit()) {
        let opponent = m.acting_side().map(Side::opponent).unwrap();
        let before = m.board.store(opponent);

        let played = play_out(pit, m).unwrap();

        prop_assert_eq!(played.snapshot.board.store(opponent), before);
    }
}
