use std::sync::Arc;

use crate::services::dealer::MatchDealer;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Coordinator owning the repository and the move pipeline.
    pub dealer: Arc<MatchDealer>,
}

impl AppState {
    pub fn new(dealer: MatchDealer) -> Self {
        Self {
            dealer: Arc::new(dealer),
        }
    }

    pub fn dealer(&self) -> &MatchDealer {
        &self.dealer
    }
}
