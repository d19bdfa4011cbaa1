use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::board::{Board, Side};

/// Opaque match identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Opaque player identity handed out at join time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A match between two players.
///
/// `turn` names the player allowed to move next.
/// - `None` while waiting for the second player
/// - `None` once either side has run out of stones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub board: Board,
    pub p1: PlayerId,
    pub p2: Option<PlayerId>,
    pub turn: Option<PlayerId>,
}

impl Match {
    /// Fresh match owned by `p1`, waiting for an opponent.
    pub fn new(p1: PlayerId) -> Self {
        Self {
            id: MatchId::new(),
            board: Board::new(),
            p1,
            p2: None,
            turn: None,
        }
    }

    /// Row owned by `player`, if they take part in this match.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if player == self.p1 {
            Some(Side::First)
        } else if self.p2 == Some(player) {
            Some(Side::Second)
        } else {
            None
        }
    }

    pub fn player_on(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::First => Some(self.p1),
            Side::Second => self.p2,
        }
    }

    /// Side of the player whose turn it is.
    pub fn acting_side(&self) -> Option<Side> {
        self.turn.and_then(|player| self.side_of(player))
    }

    /// Hand the turn to the other player. No-op while nobody holds the turn.
    pub fn pass_turn(&mut self) {
        if let Some(side) = self.acting_side() {
            self.turn = self.player_on(side.opponent());
        }
    }
}
