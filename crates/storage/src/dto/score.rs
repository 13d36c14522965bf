use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewScore, ScoreRecord};

/// Request payload sent by the quiz page once a test is finished
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must not be empty or longer than 50 characters"
    ))]
    pub name: String,

    /// Number of correct answers
    #[serde(default)]
    pub score: i32,

    /// Number of questions asked
    #[serde(default)]
    pub total: i32,

    /// Kanji ranges covered by the test, e.g. "1-100, 201-300"
    #[serde(default)]
    #[validate(length(max = 255, message = "Ranges must be at most 255 characters"))]
    pub ranges: String,
}

impl SubmitScoreRequest {
    /// Strips surrounding whitespace from the name. Validation runs on the result.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

impl From<SubmitScoreRequest> for NewScore {
    fn from(req: SubmitScoreRequest) -> Self {
        NewScore::new(req.name, req.score, req.total, req.ranges)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub status: String,
}

impl SubmitScoreResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// A single attempt as shown in the recent activity list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentScoreResponse {
    pub name: String,
    pub score: i32,
    pub total: i32,
    pub percent: f64,
    pub ranges: String,
    pub created_at: NaiveDateTime,
}

impl From<ScoreRecord> for RecentScoreResponse {
    fn from(record: ScoreRecord) -> Self {
        Self {
            name: record.name,
            score: record.score,
            total: record.total,
            percent: record.percent.to_f64().unwrap_or(0.0),
            ranges: record.ranges.unwrap_or_default(),
            created_at: record.created_at,
        }
    }
}
