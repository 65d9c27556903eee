use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::ExplainedRecommendation,
    routes::{AppState, MAX_SIMILAR_LIMIT},
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    limit: Option<usize>,
    #[serde(default)]
    include_disliked: bool,
}

/// Handler for similar-perfume recommendations
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Path(perfume_id): Path<String>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<Vec<ExplainedRecommendation>>> {
    let limit = params.limit.unwrap_or(state.default_similar_limit);
    if limit == 0 || limit > MAX_SIMILAR_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_SIMILAR_LIMIT
        )));
    }

    let perfume_id = perfume_id.trim();
    if perfume_id.is_empty() {
        return Err(AppError::InvalidInput("perfume id must not be empty".to_string()));
    }

    let explained = recommendations::similar_perfumes(
        state.provider.as_ref(),
        state.feedback.as_ref(),
        perfume_id,
        limit,
        params.include_disliked,
    )
    .await?;

    tracing::info!(
        perfume_id = %perfume_id,
        returned = explained.len(),
        "Similar perfumes explained"
    );

    Ok(Json(explained))
}
