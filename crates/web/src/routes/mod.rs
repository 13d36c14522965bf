use std::path::Path;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::features::{leaderboard, scores};
use crate::state::AppState;

/// Quiz page served at `/`, relative to the static directory.
const INDEX_FILE: &str = "kanji_app.html";

pub fn api() -> Router<AppState> {
    Router::new()
        .merge(scores::routes::routes())
        .merge(leaderboard::routes::routes())
}

/// Full application: JSON API under `/api`, health check, and the quiz page
/// with its sprites from `static_dir`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api())
        .route("/health", get(health))
        .route_service("/", ServeFile::new(static_dir.join(INDEX_FILE)))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
