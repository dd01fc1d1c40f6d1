use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use crate::{error::AppResult, middleware::request_id::RequestId, models::RecommendationResult};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub title: String,
}

/// Handler for `GET /recommendations?title=...`
pub async fn recommend_by_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationRequest>, QueryRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Query(request) = query?;
    handle(&state, request_id, &request.title).await
}

/// Handler for `POST /recommendations` with a JSON body
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Json(request) = body?;
    handle(&state, request_id, &request.title).await
}

async fn handle(
    state: &AppState,
    request_id: RequestId,
    title: &str,
) -> AppResult<Json<RecommendationResult>> {
    tracing::info!(request_id = %request_id, query = %title, "Processing recommendation request");

    let result = state.recommendations.recommend(title).await.map_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Recommendation request failed");
        e
    })?;

    Ok(Json(result))
}
