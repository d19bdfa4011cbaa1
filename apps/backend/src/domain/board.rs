//! Two-row Mancala board: six pits and a store per player.

use serde::{Deserialize, Serialize};

/// Pits per player, not counting the store.
pub const PITS: usize = 6;
/// Slots per row: six pits followed by the store.
pub const ROW_SLOTS: usize = PITS + 1;
/// Index of the store within a row.
pub const STORE: usize = PITS;
/// Stones placed in every pit when a match starts.
pub const STARTING_STONES: u8 = 6;

pub type Row = [u8; ROW_SLOTS];

/// Which row of the board a player owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Board stored as `[first player's row, second player's row]`.
///
/// Serialized as a plain nested array so stored matches and HTTP responses
/// share one shape: `[[6,6,6,6,6,6,0],[6,6,6,6,6,6,0]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: [Row; 2],
}

impl Board {
    /// Starting configuration: six stones per pit, empty stores.
    pub fn new() -> Self {
        let mut row = [STARTING_STONES; ROW_SLOTS];
        row[STORE] = 0;
        Self { rows: [row, row] }
    }

    pub fn from_rows(first: Row, second: Row) -> Self {
        Self {
            rows: [first, second],
        }
    }

    #[inline]
    pub fn row(&self, side: Side) -> &Row {
        &self.rows[side.index()]
    }

    #[inline]
    pub fn row_mut(&mut self, side: Side) -> &mut Row {
        &mut self.rows[side.index()]
    }

    pub fn rows(&self) -> &[Row; 2] {
        &self.rows
    }

    #[inline]
    pub fn pit(&self, side: Side, pit: usize) -> u8 {
        self.rows[side.index()][pit]
    }

    #[inline]
    pub fn store(&self, side: Side) -> u8 {
        self.rows[side.index()][STORE]
    }

    /// True when all six pits of `side` are empty (the store is ignored).
    pub fn side_is_empty(&self, side: Side) -> bool {
        self.row(side)[..PITS].iter().all(|&stones| stones == 0)
    }

    /// Either side out of stones means nobody can move any more.
    pub fn is_finished(&self) -> bool {
        self.side_is_empty(Side::First) || self.side_is_empty(Side::Second)
    }

    /// Stones on the whole board, stores included.
    pub fn total_stones(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|&stones| u32::from(stones))
            .sum()
    }

    /// The same board with `side`'s row listed first.
    pub fn oriented_for(&self, side: Side) -> Board {
        Board::from_rows(*self.row(side), *self.row(side.opponent()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_board_has_six_stones_per_pit() {
        let board = Board::new();
        for side in [Side::First, Side::Second] {
            assert_eq!(board.row(side), &[6, 6, 6, 6, 6, 6, 0]);
        }
        assert_eq!(board.total_stones(), 72);
        assert!(!board.is_finished());
    }

    #[test]
    fn finished_when_one_side_is_empty() {
        let board = Board::from_rows([0, 0, 0, 0, 0, 0, 30], [1, 0, 0, 0, 0, 0, 0]);
        assert!(board.side_is_empty(Side::First));
        assert!(!board.side_is_empty(Side::Second));
        assert!(board.is_finished());
    }

    #[test]
    fn oriented_for_second_swaps_rows() {
        let board = Board::from_rows([0, 1, 0, 0, 0, 0, 0], [1, 0, 0, 0, 0, 0, 3]);
        let view = board.oriented_for(Side::Second);
        assert_eq!(view.row(Side::First), &[1, 0, 0, 0, 0, 0, 3]);
        assert_eq!(view.row(Side::Second), &[0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(board.oriented_for(Side::First), board);
    }

    #[test]
    fn serializes_as_nested_array() {
        let json = serde_json::to_string(&Board::new()).unwrap();
        assert_eq!(json, "[[6,6,6,6,6,6,0],[6,6,6,6,6,6,0]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Board::new());
    }
}
