use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::models::{NewScore, ScoreAggregate, ScoreRecord};
use crate::store::ScoreStore;

/// Exclusive bound of the `DECIMAL(5,2)` percent column.
const PERCENT_LIMIT: Decimal = Decimal::ONE_THOUSAND;

/// Score store kept in process memory.
///
/// Mirrors the PostgreSQL queries, including their ordering rules and the
/// range of the percent column, and can be switched off to behave like an
/// unreachable backend.
pub struct InMemoryScoreStore {
    records: Mutex<Vec<ScoreRecord>>,
    available: AtomicBool,
}

impl Default for InMemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable every operation fails with `StorageError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

#[async_trait::async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn insert(&self, score: &NewScore) -> Result<i32> {
        self.ensure_available()?;

        if score.percent().abs() >= PERCENT_LIMIT {
            return Err(StorageError::OutOfRange(format!(
                "percent {} does not fit DECIMAL(5,2)",
                score.percent()
            )));
        }

        let mut records = self.records.lock().await;
        let id = records.len() as i32 + 1;

        // created_at never goes backwards, even if the wall clock does
        let now = Utc::now().naive_utc();
        let created_at = records
            .last()
            .map_or(now, |last| last.created_at.max(now));

        records.push(ScoreRecord {
            id,
            name: score.name().to_string(),
            score: score.score(),
            total: score.total(),
            percent: score.percent(),
            ranges: Some(score.ranges().to_string()),
            created_at,
        });

        Ok(id)
    }

    async fn query_aggregate(&self, limit: i64) -> Result<Vec<ScoreAggregate>> {
        self.ensure_available()?;

        let records = self.records.lock().await;

        let mut groups: BTreeMap<&str, (i64, i64, Decimal)> = BTreeMap::new();
        for record in records.iter() {
            let group = groups
                .entry(record.name.as_str())
                .or_insert((0, 0, Decimal::ZERO));
            group.0 += i64::from(record.score);
            group.1 += 1;
            group.2 += record.percent;
        }

        let mut aggregates: Vec<ScoreAggregate> = groups
            .into_iter()
            .map(|(name, (total_score, tests_taken, percent_sum))| ScoreAggregate {
                name: name.to_string(),
                total_score,
                tests_taken,
                avg_percent: percent_sum / Decimal::from(tests_taken),
            })
            .collect();

        aggregates.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| b.avg_percent.cmp(&a.avg_percent))
        });
        aggregates.truncate(limit.max(0) as usize);

        Ok(aggregates)
    }

    async fn query_recent(&self, limit: i64) -> Result<Vec<ScoreRecord>> {
        self.ensure_available()?;

        let mut recent = self.records.lock().await.clone();
        recent.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent.truncate(limit.max(0) as usize);

        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(store: &InMemoryScoreStore, entries: &[(&str, i32, i32)]) {
        for (name, score, total) in entries {
            store
                .insert(&NewScore::new(*name, *score, *total, ""))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryScoreStore::new();
        let first = store.insert(&NewScore::new("A", 1, 2, "")).await.unwrap();
        let second = store.insert(&NewScore::new("A", 1, 2, "")).await.unwrap();

        assert!(second > first);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_aggregate_groups_by_name() {
        let store = InMemoryScoreStore::new();
        seed(&store, &[("A", 10, 10), ("A", 0, 10), ("B", 5, 10)]).await;

        let aggregates = store.query_aggregate(10).await.unwrap();
        assert_eq!(aggregates.len(), 2);

        assert_eq!(aggregates[0].name, "A");
        assert_eq!(aggregates[0].total_score, 10);
        assert_eq!(aggregates[0].tests_taken, 2);
        assert_eq!(aggregates[0].avg_percent, Decimal::from(50));

        assert_eq!(aggregates[1].name, "B");
        assert_eq!(aggregates[1].total_score, 5);
        assert_eq!(aggregates[1].tests_taken, 1);
        assert_eq!(aggregates[1].avg_percent, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_aggregate_breaks_ties_on_average() {
        let store = InMemoryScoreStore::new();
        // Same total score, C needed fewer questions to get there
        seed(&store, &[("B", 5, 20), ("C", 5, 5)]).await;

        let aggregates = store.query_aggregate(10).await.unwrap();
        assert_eq!(aggregates[0].name, "C");
        assert_eq!(aggregates[1].name, "B");
    }

    #[tokio::test]
    async fn test_aggregate_respects_limit() {
        let store = InMemoryScoreStore::new();
        for i in 0..50 {
            store
                .insert(&NewScore::new(format!("player-{i}"), i, 50, ""))
                .await
                .unwrap();
        }

        let aggregates = store.query_aggregate(10).await.unwrap();
        assert_eq!(aggregates.len(), 10);
        assert_eq!(aggregates[0].name, "player-49");
    }

    #[tokio::test]
    async fn test_recent_newest_first() {
        let store = InMemoryScoreStore::new();
        seed(&store, &[("R1", 1, 1), ("R2", 1, 1), ("R3", 1, 1)]).await;

        let recent = store.query_recent(5).await.unwrap();
        let names: Vec<&str> = recent.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["R3", "R2", "R1"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_percent_outside_column_range() {
        let store = InMemoryScoreStore::new();

        // 999.99 is the largest value the column holds
        store
            .insert(&NewScore::new("Max", 99_999, 10_000, ""))
            .await
            .unwrap();

        let result = store.insert(&NewScore::new("Over", 10, 1, "")).await;
        assert!(matches!(result, Err(StorageError::OutOfRange(_))));

        let result = store.insert(&NewScore::new("Under", -10, 1, "")).await;
        assert!(matches!(result, Err(StorageError::OutOfRange(_))));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_without_writing() {
        let store = InMemoryScoreStore::new();
        store.set_available(false);

        let result = store.insert(&NewScore::new("A", 1, 1, "")).await;
        assert!(matches!(result, Err(StorageError::Unavailable)));
        assert!(store.query_recent(5).await.is_err());
        assert!(store.query_aggregate(10).await.is_err());

        store.set_available(true);
        assert!(store.is_empty().await);
    }
}
