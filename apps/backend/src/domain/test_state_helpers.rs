use crate::domain::board::{Board, Row};
use crate::domain::sowing::{apply, Landing, SowOutcome};
use crate::domain::state::{Match, PlayerId};
use crate::errors::domain::DomainError;

/// Two-player match with the given rows; `second_to_move` picks the turn holder.
pub fn make_match(first: Row, second: Row, second_to_move: bool) -> Match {
    let mut m = Match::new(PlayerId::new());
    let p2 = PlayerId::new();
    m.p2 = Some(p2);
    m.board = Board::from_rows(first, second);
    m.turn = Some(if second_to_move { p2 } else { m.p1 });
    m
}

/// Final state of a whole move, chaining sub-moves the way the pipeline does.
pub struct PlayedMove {
    pub snapshot: Match,
    pub landing: Landing,
    pub steps: usize,
}

pub fn play_out(pit: usize, snapshot: Match) -> Result<PlayedMove, DomainError> {
    let mut pit = pit;
    let mut snapshot = snapshot;
    let mut steps = 0;
    loop {
        steps += 1;
        match apply(pit, snapshot)? {
            SowOutcome::Continue {
                pit: next,
                snapshot: next_snapshot,
            } => {
                pit = next;
                snapshot = next_snapshot;
            }
            SowOutcome::Complete { snapshot, landing } => {
                return Ok(PlayedMove {
                    snapshot,
                    landing,
                    steps,
                })
            }
        }
    }
}
