//! What a single player is shown of a match.

use serde::Serialize;

use crate::domain::board::{Board, Side};
use crate::domain::state::{Match, MatchId, PlayerId};

/// True only if `player` holds the turn and both sides still have stones in
/// their pits. A side with six empty pits ends the game for everybody.
pub fn player_turn(snapshot: &Match, player: PlayerId) -> bool {
    snapshot.turn == Some(player) && !snapshot.board.is_finished()
}

/// Match as presented to one player: their own row always comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    #[serde(rename = "match")]
    pub match_id: MatchId,
    pub board: Board,
    pub my_turn: bool,
}

impl PlayerView {
    pub fn for_player(snapshot: &Match, player: PlayerId) -> Self {
        let side = snapshot.side_of(player).unwrap_or(Side::First);
        Self {
            match_id: snapshot.id,
            board: snapshot.board.oriented_for(side),
            my_turn: player_turn(snapshot, player),
        }
    }
}
