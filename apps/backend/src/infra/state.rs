use std::sync::Arc;

use tracing::info;

use crate::config::dealer::DealerConfig;
use crate::error::AppError;
use crate::repos::{InMemoryMatchRepo, RedisMatchRepo, SharedMatchRepo};
use crate::services::dealer::MatchDealer;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    dealer_config: DealerConfig,
    repo: Option<SharedMatchRepo>,
    redis_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            dealer_config: DealerConfig::default(),
            repo: None,
            redis_url: None,
        }
    }

    /// Use an already constructed repository. Takes precedence over `with_redis`.
    pub fn with_repo(mut self, repo: SharedMatchRepo) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_redis(mut self, redis_url: impl Into<String>) -> Self {
        self.redis_url = Some(redis_url.into());
        self
    }

    pub fn with_dealer_config(mut self, config: DealerConfig) -> Self {
        self.dealer_config = config;
        self
    }

    /// Connect the repository and start the move pipeline.
    ///
    /// Falls back to the in-memory repository when neither a repo nor a
    /// Redis URL was given.
    pub async fn build(self) -> Result<AppState, AppError> {
        let repo: SharedMatchRepo = match (self.repo, self.redis_url) {
            (Some(repo), _) => repo,
            (None, Some(url)) => Arc::new(RedisMatchRepo::connect(&url).await?),
            (None, None) => {
                info!("Using in-memory match store");
                Arc::new(InMemoryMatchRepo::new())
            }
        };

        let dealer = MatchDealer::new(repo, &self.dealer_config);
        Ok(AppState::new(dealer))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
