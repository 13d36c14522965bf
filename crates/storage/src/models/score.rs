use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted quiz attempt. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoreRecord {
    pub id: i32,
    pub name: String,
    pub score: i32,
    pub total: i32,
    pub percent: Decimal,
    pub ranges: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Per-name aggregate as returned by the store, before ranks are assigned.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScoreAggregate {
    pub name: String,
    pub total_score: i64,
    pub tests_taken: i64,
    pub avg_percent: Decimal,
}

/// A score ready to be inserted.
///
/// The percentage is derived from `score` and `total` when the value is built
/// and cannot be set independently, so the stored percent always matches.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScore {
    name: String,
    score: i32,
    total: i32,
    percent: Decimal,
    ranges: String,
}

impl NewScore {
    pub fn new(name: impl Into<String>, score: i32, total: i32, ranges: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            total,
            percent: percent_of(score, total),
            ranges: ranges.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    pub fn ranges(&self) -> &str {
        &self.ranges
    }
}

/// `score / total * 100` rounded to two decimals, or zero when `total` is not
/// positive. Scores above `total` are not clamped.
pub fn percent_of(score: i32, total: i32) -> Decimal {
    if total <= 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(score) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_percent_exact() {
        assert_eq!(percent_of(10, 10), dec("100"));
        assert_eq!(percent_of(5, 10), dec("50"));
        assert_eq!(percent_of(0, 10), Decimal::ZERO);
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(percent_of(1, 3), dec("33.33"));
        assert_eq!(percent_of(2, 3), dec("66.67"));
        assert_eq!(percent_of(1, 8), dec("12.50"));
        assert_eq!(percent_of(1, 7), dec("14.29"));
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(percent_of(0, 0), Decimal::ZERO);
        assert_eq!(percent_of(7, 0), Decimal::ZERO);
        assert_eq!(percent_of(7, -3), Decimal::ZERO);
    }

    #[test]
    fn test_percent_not_clamped() {
        assert_eq!(percent_of(15, 10), dec("150"));
    }

    #[test]
    fn test_new_score_derives_percent() {
        let score = NewScore::new("Alice", 3, 4, "1-100");
        assert_eq!(score.name(), "Alice");
        assert_eq!(score.score(), 3);
        assert_eq!(score.total(), 4);
        assert_eq!(score.percent(), dec("75"));
        assert_eq!(score.ranges(), "1-100");
    }
}
