use std::sync::Arc;

use storage::{ScoreStore, dto::score::SubmitScoreRequest, models::NewScore};
use validator::Validate;

use crate::error::WebResult;

/// Validates submissions and appends them to the score store.
#[derive(Clone)]
pub struct ScoreIngestion {
    store: Arc<dyn ScoreStore>,
}

impl ScoreIngestion {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Trims the name, validates the request, derives the percentage and
    /// inserts the record. Nothing is written when validation fails.
    pub async fn submit(&self, req: SubmitScoreRequest) -> WebResult<i32> {
        let req = req.normalized();
        req.validate()?;

        let score = NewScore::from(req);
        let id = self.store.insert(&score).await?;

        tracing::info!(
            id,
            name = score.name(),
            score = score.score(),
            total = score.total(),
            "Score recorded"
        );

        Ok(id)
    }
}
