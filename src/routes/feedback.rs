use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Feedback, FeedbackKind},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub perfume_id: String,
    pub kind: FeedbackKind,
}

/// Records a like or dislike
pub async fn record_feedback(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let perfume_id = request.perfume_id.trim();
    if perfume_id.is_empty() {
        return Err(AppError::InvalidInput(
            "perfume_id must not be empty".to_string(),
        ));
    }

    let feedback = state.feedback.record(perfume_id, request.kind).await;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Lists all recorded feedback
pub async fn list_feedback(State(state): State<Arc<AppState>>) -> Json<Vec<Feedback>> {
    Json(state.feedback.all().await)
}

/// Latest feedback on one perfume
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Path(perfume_id): Path<String>,
) -> AppResult<Json<Feedback>> {
    state
        .feedback
        .get(perfume_id.trim())
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No feedback for perfume {}", perfume_id)))
}
