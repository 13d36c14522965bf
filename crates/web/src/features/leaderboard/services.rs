use std::sync::Arc;

use storage::{
    ScoreStore,
    dto::{leaderboard::LeaderboardEntry, score::RecentScoreResponse},
    error::Result,
};

/// Read-only views over the score store. Every call re-reads the store.
#[derive(Clone)]
pub struct LeaderboardAggregator {
    store: Arc<dyn ScoreStore>,
}

impl LeaderboardAggregator {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Top `limit` names, ranked 1..k in the order the store returns them.
    pub async fn top_leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let aggregates = self.store.query_aggregate(limit).await?;

        Ok(aggregates
            .into_iter()
            .zip(1..)
            .map(|(aggregate, rank)| LeaderboardEntry::ranked(rank, aggregate))
            .collect())
    }

    /// Latest `limit` attempts, newest first.
    pub async fn recent_attempts(&self, limit: i64) -> Result<Vec<RecentScoreResponse>> {
        let records = self.store.query_recent(limit).await?;

        Ok(records.into_iter().map(RecentScoreResponse::from).collect())
    }
}
