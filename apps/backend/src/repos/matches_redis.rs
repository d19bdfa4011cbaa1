//! Redis-backed match store.
//!
//! Layout:
//! - `match:{id}`       JSON encoded match
//! - `waiting_match`    set of match ids waiting for an opponent
//! - `lock:match:{id}`  advisory lock, `SET NX PX`

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tracing::{debug, info, warn};

use super::{match_not_found, LockStatus, MatchRepo};
use crate::domain::state::{Match, MatchId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;

const WAITING_SET: &str = "waiting_match";

fn match_key(id: MatchId) -> String {
    format!("match:{id}")
}

fn lock_key(id: MatchId) -> String {
    format!("lock:match:{id}")
}

fn store_err(err: RedisError) -> DomainError {
    DomainError::persistence(format!("redis: {err}"))
}

fn parse_waiting_id(raw: &str) -> Result<MatchId, DomainError> {
    raw.parse().map_err(|err| {
        DomainError::infra(
            InfraErrorKind::Serialization,
            format!("invalid waiting match id {raw}: {err}"),
        )
    })
}

/// A waiting id whose match is gone is skipped (`Ok(None)`), like the
/// in-memory store does.
fn skip_dangling(found: Result<Match, DomainError>) -> Result<Option<Match>, DomainError> {
    match found {
        Ok(m) => Ok(Some(m)),
        Err(DomainError::NotFound(..)) => Ok(None),
        Err(err) => Err(err),
    }
}

fn encode(m: &Match) -> Result<String, DomainError> {
    serde_json::to_string(m).map_err(|err| {
        DomainError::infra(
            InfraErrorKind::Serialization,
            format!("failed to encode match {}: {err}", m.id),
        )
    })
}

fn decode(id: MatchId, raw: &str) -> Result<Match, DomainError> {
    serde_json::from_str(raw).map_err(|err| {
        DomainError::infra(
            InfraErrorKind::Serialization,
            format!("failed to decode match {id}: {err}"),
        )
    })
}

pub struct RedisMatchRepo {
    conn: ConnectionManager,
}

impl RedisMatchRepo {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let conn = ConnectionManager::new(client).await.map_err(|err| {
            AppError::internal(
                ErrorCode::ConfigError,
                format!("Unable to initialize Redis connection manager: {err}"),
            )
        })?;

        info!("Connected match store to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl MatchRepo for RedisMatchRepo {
    async fn get(&self, id: MatchId) -> Result<Match, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(match_key(id)).await.map_err(store_err)?;
        match raw {
            Some(raw) => decode(id, &raw),
            None => Err(match_not_found(id)),
        }
    }

    async fn get_waiting_match(&self) -> Result<Option<Match>, DomainError> {
        let mut conn = self.conn.clone();
        loop {
            let popped: Option<String> = conn.spop(WAITING_SET).await.map_err(store_err)?;
            let Some(raw_id) = popped else {
                debug!("no waiting match");
                return Ok(None);
            };

            let id = parse_waiting_id(&raw_id)?;
            if let Some(found) = skip_dangling(self.get(id).await)? {
                return Ok(Some(found));
            }
            warn!(match_id = %id, "Dropping dangling waiting match id");
        }
    }

    async fn add_waiting_match(&self, m: &Match) -> Result<(), DomainError> {
        let encoded = encode(m)?;
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .set(match_key(m.id), encoded)
            .ignore()
            .sadd(WAITING_SET, m.id.to_string())
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_err)
    }

    async fn save(&self, m: &Match) -> Result<(), DomainError> {
        let encoded = encode(m)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(match_key(m.id), encoded)
            .await
            .map_err(store_err)
    }

    async fn lock(&self, id: MatchId, ttl: Duration) -> Result<LockStatus, DomainError> {
        let mut conn = self.conn.clone();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        let reply: Option<String> = redis::cmd("SET")
            .arg(lock_key(id))
            .arg("locked")
            .arg("NX")
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;

        Ok(match reply {
            Some(_) => LockStatus::Acquired,
            None => LockStatus::AlreadyLocked,
        })
    }
}
