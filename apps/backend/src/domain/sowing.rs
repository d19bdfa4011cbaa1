//! Stone sowing: one step of a move.
//!
//! The board is viewed from the mover's side as fourteen slots: the mover's
//! six pits and store (0..=6) followed by the opponent's six pits and store
//! (7..=13). Stones are dropped one per slot going forward and wrapping
//! around; the opponent's store (slot 13) is skipped.
//!
//! Where the last stone lands decides what happens next:
//!
//! | landing slot                          | result                         |
//! |---------------------------------------|--------------------------------|
//! | own pit, empty before the drop        | capture, move complete         |
//! | own pit, non-empty before the drop    | continue sowing from that pit  |
//! | own store                             | move complete, extra turn      |
//! | opponent pit                          | move complete                  |

use crate::domain::board::{Side, PITS, ROW_SLOTS, STORE};
use crate::domain::state::Match;
use crate::errors::domain::{DomainError, ValidationKind};

const SLOTS: usize = ROW_SLOTS * 2;
const OPPONENT_STORE: usize = SLOTS - 1;

/// Where the final stone of a completed move came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Last stone dropped into the mover's own store.
    OwnStore,
    /// Last stone dropped into an empty own pit; `captured` stones came from
    /// the opponent pit with the same index.
    Capture { pit: usize, captured: u8 },
    /// Last stone dropped on the opponent's side.
    OpponentSide,
}

impl Landing {
    pub fn grants_extra_turn(&self) -> bool {
        matches!(self, Landing::OwnStore)
    }
}

/// Result of sowing from a single pit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SowOutcome {
    /// The move goes on from `pit` with the updated snapshot.
    Continue { pit: usize, snapshot: Match },
    /// The move is over.
    Complete { snapshot: Match, landing: Landing },
}

/// Sow the stones of `pit` for the player holding the turn in `snapshot`.
///
/// `snapshot` is taken by value; the caller's copy is never touched.
pub fn apply(pit: usize, mut snapshot: Match) -> Result<SowOutcome, DomainError> {
    let side = snapshot.acting_side().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NoActivePlayer,
            format!("match {} has no player to move", snapshot.id),
        )
    })?;

    if pit >= PITS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPit,
            format!("pit {pit} is outside 0..{PITS}"),
        ));
    }

    let mut slots = linearize(&snapshot, side);
    let mut stones = slots[pit];
    if stones == 0 {
        return Err(DomainError::validation(
            ValidationKind::EmptyPit,
            format!("pit {pit} is empty"),
        ));
    }
    slots[pit] = 0;

    let mut slot = pit;
    while stones > 0 {
        slot = (slot + 1) % SLOTS;
        if slot == OPPONENT_STORE {
            continue;
        }
        slots[slot] += 1;
        stones -= 1;
    }

    let outcome = if slot < PITS {
        if slots[slot] == 1 {
            let captured = capture(&mut slots, slot);
            store_back(&mut snapshot, side, &slots);
            SowOutcome::Complete {
                snapshot,
                landing: Landing::Capture {
                    pit: slot,
                    captured,
                },
            }
        } else {
            store_back(&mut snapshot, side, &slots);
            SowOutcome::Continue {
                pit: slot,
                snapshot,
            }
        }
    } else {
        store_back(&mut snapshot, side, &slots);
        let landing = if slot == STORE {
            Landing::OwnStore
        } else {
            Landing::OpponentSide
        };
        SowOutcome::Complete { snapshot, landing }
    };

    Ok(outcome)
}

fn linearize(snapshot: &Match, side: Side) -> [u8; SLOTS] {
    let mut slots = [0u8; SLOTS];
    slots[..ROW_SLOTS].copy_from_slice(snapshot.board.row(side));
    slots[ROW_SLOTS..].copy_from_slice(snapshot.board.row(side.opponent()));
    slots
}

fn store_back(snapshot: &mut Match, side: Side, slots: &[u8; SLOTS]) {
    snapshot
        .board
        .row_mut(side)
        .copy_from_slice(&slots[..ROW_SLOTS]);
    snapshot
        .board
        .row_mut(side.opponent())
        .copy_from_slice(&slots[ROW_SLOTS..]);
}

/// Empty the landing pit and its opposite number into the mover's store.
fn capture(slots: &mut [u8; SLOTS], pit: usize) -> u8 {
    let mirrored = pit + ROW_SLOTS;
    let captured = slots[mirrored];
    slots[pit] = 0;
    slots[mirrored] = 0;
    slots[STORE] += captured + 1;
    captured
}
