//! Match storage.
//!
//! The repository is the single source of truth for match state. Services
//! hold a `SharedMatchRepo` and never cache matches between pipeline stages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::state::{Match, MatchId};
use crate::errors::domain::DomainError;

pub mod matches_memory;
pub mod matches_redis;

pub use matches_memory::InMemoryMatchRepo;
pub use matches_redis::RedisMatchRepo;

/// Outcome of trying to take the advisory lock on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    Acquired,
    AlreadyLocked,
}

#[async_trait]
pub trait MatchRepo: Send + Sync {
    /// Load a match; `NotFound` if the id is unknown.
    async fn get(&self, id: MatchId) -> Result<Match, DomainError>;

    /// Atomically pop one match waiting for a second player.
    async fn get_waiting_match(&self) -> Result<Option<Match>, DomainError>;

    /// Store `m` and register it as waiting, both or neither.
    async fn add_waiting_match(&self, m: &Match) -> Result<(), DomainError>;

    /// Overwrite the stored match.
    async fn save(&self, m: &Match) -> Result<(), DomainError>;

    /// Take a short-lived exclusive token on `id` that expires after `ttl`.
    async fn lock(&self, id: MatchId, ttl: Duration) -> Result<LockStatus, DomainError>;
}

pub type SharedMatchRepo = Arc<dyn MatchRepo>;

pub(crate) fn match_not_found(id: MatchId) -> DomainError {
    DomainError::not_found(
        crate::errors::domain::NotFoundKind::Match,
        format!("match {id} not found"),
    )
}
