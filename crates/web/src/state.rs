use std::sync::Arc;

use axum::extract::FromRef;
use storage::ScoreStore;

use crate::features::{leaderboard::services::LeaderboardAggregator, scores::services::ScoreIngestion};

/// Shared handler state. Both services wrap the same store.
#[derive(Clone)]
pub struct AppState {
    pub ingestion: ScoreIngestion,
    pub leaderboard: LeaderboardAggregator,
}

impl AppState {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self {
            ingestion: ScoreIngestion::new(store.clone()),
            leaderboard: LeaderboardAggregator::new(store),
        }
    }
}

impl FromRef<AppState> for ScoreIngestion {
    fn from_ref(state: &AppState) -> Self {
        state.ingestion.clone()
    }
}

impl FromRef<AppState> for LeaderboardAggregator {
    fn from_ref(state: &AppState) -> Self {
        state.leaderboard.clone()
    }
}
