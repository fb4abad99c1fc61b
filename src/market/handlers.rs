use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{dto::AnalyzeRequest, prompts, services::complete_json};
use crate::{auth::extractors::AuthUser, auth::handlers::bad_body, error::AppError, state::AppState};

const FIELDS_REQUIRED: &str = "All fields are required.";
const ANALYZE_FAILED: &str = "Something went wrong.";
const MARKET_STATS_FAILED: &str = "Unable to generate market stats.";

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/market-stats", get(market_stats))
}

#[instrument(skip(state, claims, payload), fields(user_id = %claims.sub))]
pub async fn analyze(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(|r| bad_body(r, FIELDS_REQUIRED))?;
    let input = payload
        .into_input()
        .ok_or_else(|| AppError::Validation(FIELDS_REQUIRED.into()))?;

    let prompt = prompts::suggestion_prompt(&input);
    let suggestions = complete_json(state.completions.as_ref(), &prompt, ANALYZE_FAILED).await?;
    info!("suggestions generated");
    Ok(Json(suggestions))
}

#[instrument(skip(state, claims), fields(user_id = %claims.sub))]
pub async fn market_stats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, AppError> {
    let stats = complete_json(
        state.completions.as_ref(),
        prompts::MARKET_SUMMARY_PROMPT,
        MARKET_STATS_FAILED,
    )
    .await?;
    Ok(Json(stats))
}
