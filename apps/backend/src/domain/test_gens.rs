// Proptest generators for boards and legal move selections.

use proptest::prelude::*;

use crate::domain::board::{Row, PITS};
use crate::domain::state::Match;
use crate::domain::test_state_helpers::make_match;

/// A row with up to `max` stones per pit and up to 30 in the store.
pub fn row(max: u8) -> impl Strategy<Value = Row> {
    (prop::array::uniform6(0..=max), 0u8..=30).prop_map(|(pits, store)| {
        let mut row = [0u8; PITS + 1];
        row[..PITS].copy_from_slice(&pits);
        row[PITS] = store;
        row
    })
}

/// A started match whose mover has at least one playable pit, plus that pit.
pub fn match_with_legal_pit() -> impl Strategy<Value = (Match, usize)> {
    (row(10), row(10), any::<bool>(), 0..PITS)
        .prop_filter("mover needs stones", |(first, second, second_to_move, _)| {
            let mover = if *second_to_move { second } else { first };
            mover[..PITS].iter().any(|&s| s > 0)
        })
        .prop_map(|(first, second, second_to_move, hint)| {
            let mover = if second_to_move { second } else { first };
            let pit = (0..PITS)
                .map(|offset| (hint + offset) % PITS)
                .find(|&p| mover[p] > 0)
                .unwrap_or(0);
            (make_match(first, second, second_to_move), pit)
        })
}
