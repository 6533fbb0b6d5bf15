use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    HealthResponse, Item, LookupQuery, RecommendationRequest, RecommendationResponse,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        items: state.recommender.item_count(),
        loaded_at: state.loaded_at,
    })
}

/// Titles similar to the requested one.
///
/// An unknown title is not an error: the response has `matched: false` and no
/// recommendations, and the caller decides how to fall back.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be blank".to_string()));
    }

    let top_n = state.effective_top_n(request.top_n);
    let recommender = state.recommender.clone();
    let title = request.title.clone();

    // Scoring scans the whole catalog; keep it off the async workers.
    let (matched, recommendations) = tokio::task::spawn_blocking(move || {
        match recommender.lookup(&title) {
            Some(_) => (true, recommender.recommend_scored(&title, top_n)),
            None => (false, Vec::new()),
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        matched,
        top_n,
        returned = recommendations.len(),
        "Processed recommendation request"
    );

    Ok(Json(RecommendationResponse {
        query: request.title,
        matched,
        recommendations,
    }))
}

/// Resolves a title to its catalog entry
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> AppResult<Json<Item>> {
    state
        .recommender
        .lookup(&params.title)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no catalog entry for {:?}", params.title)))
}
