use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::{feedback::FeedbackStore, providers::RecommendationProvider};

pub mod feedback;
pub mod notes;
pub mod perfumes;
pub mod recommendations;

/// Upper bound on `limit` for similar-perfume requests
pub const MAX_SIMILAR_LIMIT: usize = 50;

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn RecommendationProvider>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub default_similar_limit: usize,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn RecommendationProvider>,
        feedback: Arc<dyn FeedbackStore>,
        default_similar_limit: usize,
    ) -> Self {
        Self {
            provider,
            feedback,
            default_similar_limit: default_similar_limit.clamp(1, MAX_SIMILAR_LIMIT),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes/normalize", post(notes::normalize))
        .route("/recommendations/explain", post(recommendations::explain))
        .route("/recommendations/compare", post(recommendations::compare))
        .route("/perfumes/:id/similar", get(perfumes::similar))
        .route(
            "/feedback",
            get(feedback::list_feedback).post(feedback::record_feedback),
        )
        .route("/feedback/:id", get(feedback::get_feedback))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
