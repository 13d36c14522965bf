use crate::error::Result;
use crate::models::{NewScore, ScoreAggregate, ScoreRecord};

/// Durable, append-only storage of quiz attempts.
///
/// Every call is a single atomic statement against the backend; implementations
/// never retry and never cache between calls.
#[async_trait::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Appends one attempt and returns the id assigned by the store.
    async fn insert(&self, score: &NewScore) -> Result<i32>;

    /// Per-name totals ordered by total score, then average percent, both descending.
    async fn query_aggregate(&self, limit: i64) -> Result<Vec<ScoreAggregate>>;

    /// Latest attempts, newest first.
    async fn query_recent(&self, limit: i64) -> Result<Vec<ScoreRecord>>;
}
