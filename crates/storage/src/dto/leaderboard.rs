use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ScoreAggregate;

/// Number of names shown on the leaderboard.
pub const LEADERBOARD_SIZE: i64 = 10;

/// Number of attempts shown in the recent activity list.
pub const RECENT_SIZE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub name: String,
    pub total_score: i64,
    pub tests_taken: i64,
    pub avg_percent: f64,
}

impl LeaderboardEntry {
    /// Builds the public entry for an aggregate at the given 1-based position.
    pub fn ranked(rank: i64, aggregate: ScoreAggregate) -> Self {
        let avg_percent = aggregate
            .avg_percent
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0);

        Self {
            rank,
            name: aggregate.name,
            total_score: aggregate.total_score,
            tests_taken: aggregate.tests_taken,
            avg_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_ranked_rounds_average() {
        let aggregate = ScoreAggregate {
            name: "Alice".to_string(),
            total_score: 17,
            tests_taken: 3,
            avg_percent: Decimal::from_str("56.6666666666666667").unwrap(),
        };

        let entry = LeaderboardEntry::ranked(1, aggregate);
        assert_eq!(entry.rank, 1);
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.total_score, 17);
        assert_eq!(entry.tests_taken, 3);
        assert!((entry.avg_percent - 56.67).abs() < 1e-9);
    }
}
