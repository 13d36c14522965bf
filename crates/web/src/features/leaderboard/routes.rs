use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, get_recent_scores};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/recent", get(get_recent_scores))
}
