//! Error codes for the Mancala backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Mancala backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity
    /// Request carried no player cookie
    MissingPlayer,

    // Request Validation
    /// Pit index outside the player's six pits
    InvalidPit,
    /// Selected pit has no stones
    EmptyPit,
    /// Nobody can move in this match
    NoActivePlayer,
    /// Match id is not a valid identifier
    InvalidMatchId,

    // Resource Not Found
    /// Match not found (or not visible to the caller)
    MatchNotFound,

    // System Errors
    /// Match store read/write failed
    PersistenceFailure,
    /// Stored payload could not be decoded
    SerializationError,
    /// Sub-move chain exceeded its bound
    ChainLimit,
    /// Unexpected internal error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPlayer => "MISSING_PLAYER",
            Self::InvalidPit => "INVALID_PIT",
            Self::EmptyPit => "EMPTY_PIT",
            Self::NoActivePlayer => "NO_ACTIVE_PLAYER",
            Self::InvalidMatchId => "INVALID_MATCH_ID",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PersistenceFailure => "PERSISTENCE_FAILURE",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::ChainLimit => "CHAIN_LIMIT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
