use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::scores::handlers::submit_score,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_recent_scores,
    ),
    components(
        schemas(
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::SubmitScoreResponse,
            storage::dto::score::RecentScoreResponse,
            storage::dto::leaderboard::LeaderboardEntry,
        )
    ),
    tags(
        (name = "scores", description = "Quiz result submission"),
        (name = "leaderboard", description = "Public leaderboard and recent attempts"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Kanji scoreboard");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config.redacted_database_url()
    );
    let db = match Database::initialize(&config.database_url, config.database_max_connections)
        .await
    {
        Ok(db) => {
            tracing::info!("Database initialized");
            db
        }
        Err(e) => {
            tracing::warn!("Database not available: {}", e);
            tracing::warn!("Running without leaderboard functionality");
            Database::new_lazy(&config.database_url, config.database_max_connections)
                .context("Invalid DATABASE_URL")?
        }
    };

    let state = AppState::new(Arc::new(db.score_store()));

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = routes::app(state, &config.static_dir)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
