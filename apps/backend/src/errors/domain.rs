//! Domain-level error type used across the sowing engine, repositories and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Contention outcomes (not your turn, match locked, move in flight) are not
//! errors; they are reported through `services::dealer::MoveAcceptance`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failures caused by the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Pit index outside the mover's six pits.
    InvalidPit,
    /// Selected pit holds no stones.
    EmptyPit,
    /// The match has nobody to move (waiting for an opponent or finished).
    NoActivePlayer,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Reading from or writing to the match store failed.
    PersistenceFailure,
    /// A stored match could not be encoded or decoded.
    Serialization,
    /// A sub-move chain outgrew the stones on the board.
    ChainLimit,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or game rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Shorthand for repository failures.
    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::PersistenceFailure, detail.into())
    }
}
