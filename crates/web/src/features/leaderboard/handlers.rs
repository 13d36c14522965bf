use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    leaderboard::{LEADERBOARD_SIZE, LeaderboardEntry, RECENT_SIZE},
    score::RecentScoreResponse,
};

use crate::error::WebError;

use super::services::LeaderboardAggregator;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Top 10 names by total score", body = Vec<LeaderboardEntry>),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(leaderboard): State<LeaderboardAggregator>,
) -> Result<Response, WebError> {
    let entries = leaderboard.top_leaderboard(LEADERBOARD_SIZE).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recent",
    responses(
        (status = 200, description = "Latest 5 attempts, newest first", body = Vec<RecentScoreResponse>),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "leaderboard"
)]
pub async fn get_recent_scores(
    State(leaderboard): State<LeaderboardAggregator>,
) -> Result<Response, WebError> {
    let scores = leaderboard.recent_attempts(RECENT_SIZE).await?;

    Ok(Json(scores).into_response())
}
