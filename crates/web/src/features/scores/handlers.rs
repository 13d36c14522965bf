use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::score::{SubmitScoreRequest, SubmitScoreResponse};

use crate::error::WebError;

use super::services::ScoreIngestion;

#[utoipa::path(
    post,
    path = "/api/score",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Malformed JSON or invalid name"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(ingestion): State<ScoreIngestion>,
    body: Bytes,
) -> Result<Response, WebError> {
    // Decoded whatever the Content-Type: browsers posting a JSON string send text/plain
    let req: SubmitScoreRequest = serde_json::from_slice(&body)?;

    ingestion.submit(req).await?;

    Ok(Json(SubmitScoreResponse::ok()).into_response())
}
