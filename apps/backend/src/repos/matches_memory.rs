//! Process-local match store, used for development and tests.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{match_not_found, LockStatus, MatchRepo};
use crate::domain::state::{Match, MatchId};
use crate::errors::domain::DomainError;

#[derive(Default)]
struct Inner {
    matches: HashMap<MatchId, Match>,
    waiting: VecDeque<MatchId>,
    locks: HashMap<MatchId, Instant>,
}

#[derive(Default)]
pub struct InMemoryMatchRepo {
    inner: Mutex<Inner>,
}

impl InMemoryMatchRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matches waiting for an opponent.
    pub fn waiting_len(&self) -> usize {
        self.inner.lock().waiting.len()
    }
}

#[async_trait]
impl MatchRepo for InMemoryMatchRepo {
    async fn get(&self, id: MatchId) -> Result<Match, DomainError> {
        self.inner
            .lock()
            .matches
            .get(&id)
            .cloned()
            .ok_or_else(|| match_not_found(id))
    }

    async fn get_waiting_match(&self) -> Result<Option<Match>, DomainError> {
        let mut inner = self.inner.lock();
        while let Some(id) = inner.waiting.pop_front() {
            if let Some(m) = inner.matches.get(&id) {
                return Ok(Some(m.clone()));
            }
        }
        Ok(None)
    }

    async fn add_waiting_match(&self, m: &Match) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        inner.matches.insert(m.id, m.clone());
        if !inner.waiting.contains(&m.id) {
            inner.waiting.push_back(m.id);
        }
        Ok(())
    }

    async fn save(&self, m: &Match) -> Result<(), DomainError> {
        self.inner.lock().matches.insert(m.id, m.clone());
        Ok(())
    }

    async fn lock(&self, id: MatchId, ttl: Duration) -> Result<LockStatus, DomainError> {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        inner.locks.retain(|_, expires_at| *expires_at > now);
        if inner.locks.contains_key(&id) {
            return Ok(LockStatus::AlreadyLocked);
        }
        inner.locks.insert(id, now + ttl);
        Ok(LockStatus::Acquired)
    }
}
