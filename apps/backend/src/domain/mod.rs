//! Domain layer: pure Mancala rules and types.

pub mod board;
pub mod player_view;
pub mod sowing;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_sowing;
#[cfg(test)]
mod tests_sowing;

// Re-exports for ergonomics
pub use board::{Board, Side};
pub use player_view::{player_turn, PlayerView};
pub use sowing::{apply, Landing, SowOutcome};
pub use state::{Match, MatchId, PlayerId};
