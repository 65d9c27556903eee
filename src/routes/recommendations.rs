use axum::Json;
use serde::Deserialize;

use crate::{
    models::{ExplainedRecommendation, RawPerfume, RawRecommendation},
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub items: Vec<RawRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub source: RawPerfume,
    #[serde(default)]
    pub candidates: Vec<RawPerfume>,
}

/// Explains a recommendation list the client already fetched
pub async fn explain(Json(request): Json<ExplainRequest>) -> Json<Vec<ExplainedRecommendation>> {
    tracing::info!(item_count = request.items.len(), "Explaining recommendations");
    Json(recommendations::explain_recommendations(request.items))
}

/// Explains candidates by direct comparison with a source perfume
pub async fn compare(Json(request): Json<CompareRequest>) -> Json<Vec<ExplainedRecommendation>> {
    tracing::info!(
        source_id = %request.source.id,
        candidate_count = request.candidates.len(),
        "Comparing perfumes"
    );
    Json(recommendations::compare_perfumes(
        request.source,
        request.candidates,
    ))
}
