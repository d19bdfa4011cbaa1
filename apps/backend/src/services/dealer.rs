//! Match coordinator: matchmaking, lookups and move admission.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::dealer::DealerConfig;
use crate::domain::board::PITS;
use crate::domain::player_view::player_turn;
use crate::domain::state::{Match, MatchId, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{match_not_found, LockStatus, SharedMatchRepo};
use crate::services::pipeline::MovePipeline;

/// Why a well-formed move was turned away. Callers may retry later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotYourTurn,
    AlreadyLocked,
    MoveInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAcceptance {
    /// The move is queued; its result shows up in the stored match later.
    Accepted,
    Rejected(RejectReason),
}

impl MoveAcceptance {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveAcceptance::Accepted)
    }
}

pub struct MatchDealer {
    repo: SharedMatchRepo,
    pipeline: MovePipeline,
    lock_ttl: Duration,
}

impl MatchDealer {
    /// Build the dealer and start its move pipeline. Must run inside a tokio runtime.
    pub fn new(repo: SharedMatchRepo, config: &DealerConfig) -> Self {
        let pipeline = MovePipeline::start(repo.clone(), config);
        Self {
            repo,
            pipeline,
            lock_ttl: config.lock_ttl,
        }
    }

    pub fn pipeline(&self) -> &MovePipeline {
        &self.pipeline
    }

    /// Pair the caller with a waiting match, or open a new one for them.
    ///
    /// Returns the match and the identity assigned to the caller.
    pub async fn join_match(&self) -> Result<(Match, PlayerId), DomainError> {
        if let Some(mut waiting) = self.repo.get_waiting_match().await? {
            let p2 = PlayerId::new();
            waiting.p2 = Some(p2);
            waiting.turn = Some(waiting.p1);
            self.repo.save(&waiting).await?;

            info!(match_id = %waiting.id, "Second player joined, match started");
            return Ok((waiting, p2));
        }

        let p1 = PlayerId::new();
        let created = Match::new(p1);
        self.repo.add_waiting_match(&created).await?;

        info!(match_id = %created.id, "Match created, waiting for opponent");
        Ok((created, p1))
    }

    /// Load a match for one of its players.
    ///
    /// Unknown ids and outsiders both get `NotFound`.
    pub async fn get_match(&self, id: MatchId, player: PlayerId) -> Result<Match, DomainError> {
        let found = self.repo.get(id).await?;
        if found.side_of(player).is_none() {
            debug!(match_id = %id, "Lookup by non-participant");
            return Err(match_not_found(id));
        }
        Ok(found)
    }

    pub fn player_turn(&self, snapshot: &Match, player: PlayerId) -> bool {
        player_turn(snapshot, player)
    }

    /// Validate a move and queue it. Returns before the move is applied.
    ///
    /// Checks run in order: pit range, turn, pit contents, in-flight move,
    /// advisory lock. After claiming the match the stored copy is re-read so a
    /// stale `snapshot` can never overwrite a newer move.
    pub async fn make_move(
        &self,
        pit: i64,
        snapshot: &Match,
        player: PlayerId,
    ) -> Result<MoveAcceptance, DomainError> {
        let pit = checked_pit(pit)?;

        if !player_turn(snapshot, player) {
            return Ok(MoveAcceptance::Rejected(RejectReason::NotYourTurn));
        }
        ensure_pit_has_stones(snapshot, pit)?;

        let match_id = snapshot.id;
        if !self.pipeline.claim(match_id) {
            debug!(%match_id, "Move already in flight");
            return Ok(MoveAcceptance::Rejected(RejectReason::MoveInFlight));
        }

        match self.admit(match_id, pit, player).await {
            Ok(Some(current)) => {
                self.pipeline.submit(pit, current)?;
                Ok(MoveAcceptance::Accepted)
            }
            Ok(None) => {
                self.pipeline.release(match_id);
                Ok(MoveAcceptance::Rejected(RejectReason::AlreadyLocked))
            }
            Err(AdmitError::Rejected(reason)) => {
                self.pipeline.release(match_id);
                Ok(MoveAcceptance::Rejected(reason))
            }
            Err(AdmitError::Domain(err)) => {
                self.pipeline.release(match_id);
                Err(err)
            }
        }
    }

    /// Lock the match and re-check the move against the stored copy.
    /// `Ok(None)` means the lock is held elsewhere.
    async fn admit(
        &self,
        match_id: MatchId,
        pit: usize,
        player: PlayerId,
    ) -> Result<Option<Match>, AdmitError> {
        if self.repo.lock(match_id, self.lock_ttl).await? == LockStatus::AlreadyLocked {
            debug!(%match_id, "Match locked");
            return Ok(None);
        }

        let current = self.repo.get(match_id).await?;
        if !player_turn(&current, player) {
            return Err(AdmitError::Rejected(RejectReason::NotYourTurn));
        }
        ensure_pit_has_stones(&current, pit)?;

        Ok(Some(current))
    }
}

enum AdmitError {
    Rejected(RejectReason),
    Domain(DomainError),
}

impl From<DomainError> for AdmitError {
    fn from(err: DomainError) -> Self {
        AdmitError::Domain(err)
    }
}

fn checked_pit(pit: i64) -> Result<usize, DomainError> {
    match usize::try_from(pit) {
        Ok(pit) if pit < PITS => Ok(pit),
        _ => Err(DomainError::validation(
            ValidationKind::InvalidPit,
            format!("pit {pit} is outside 0..{PITS}"),
        )),
    }
}

fn ensure_pit_has_stones(snapshot: &Match, pit: usize) -> Result<(), DomainError> {
    let side = snapshot.acting_side().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NoActivePlayer,
            format!("match {} has no player to move", snapshot.id),
        )
    })?;
    if snapshot.board.pit(side, pit) == 0 {
        return Err(DomainError::validation(
            ValidationKind::EmptyPit,
            format!("pit {pit} is empty"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pit_bounds() {
        assert_eq!(checked_pit(0).unwrap(), 0);
        assert_eq!(checked_pit(5).unwrap(), 5);
        for bad in [-1, 6, 7, i64::MIN, i64::MAX] {
            assert!(matches!(
                checked_pit(bad),
                Err(DomainError::Validation(ValidationKind::InvalidPit, _))
            ));
        }
    }
}
