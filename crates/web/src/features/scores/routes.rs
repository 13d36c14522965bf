use axum::{Router, routing::post};

use super::handlers::submit_score;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/score", post(submit_score))
}
