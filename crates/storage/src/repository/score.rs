use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::{NewScore, ScoreAggregate, ScoreRecord};
use crate::store::ScoreStore;

/// PostgreSQL-backed score store. Cloning is cheap, the pool is shared.
#[derive(Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait::async_trait]
impl ScoreStore for ScoreRepository {
    async fn insert(&self, score: &NewScore) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO scores (name, score, total, percent, ranges)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(score.name())
        .bind(score.score())
        .bind(score.total())
        .bind(score.percent())
        .bind(score.ranges())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn query_aggregate(&self, limit: i64) -> Result<Vec<ScoreAggregate>> {
        let rows = sqlx::query(
            r#"
            SELECT
                name,
                SUM(score) as total_score,
                COUNT(*) as tests_taken,
                AVG(percent) as avg_percent
            FROM scores
            GROUP BY name
            ORDER BY total_score DESC, avg_percent DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_rows(rows, "leaderboard"))
    }

    async fn query_recent(&self, limit: i64) -> Result<Vec<ScoreRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, score, total, percent, ranges, created_at
            FROM scores
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_rows(rows, "recent scores"))
    }
}

/// Decodes each row on its own so one malformed row only drops itself.
fn decode_rows<T>(rows: Vec<PgRow>, query: &str) -> Vec<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    rows.iter()
        .filter_map(|row| match T::from_row(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(query, error = %e, "Skipping row that failed to decode");
                None
            }
        })
        .collect()
}
