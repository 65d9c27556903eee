/// Recommendation data provider abstraction
///
/// The similarity engine lives in an external backend. Providers only fetch
/// its raw output; interpreting that output is the explainer's job.
use crate::{error::AppResult, models::RawRecommendation};

pub mod backend;

/// Source of raw "similar perfume" recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch up to `limit` perfumes similar to `perfume_id`, in backend rank order
    ///
    /// Each item carries the backend's similarity signal relative to the
    /// requested perfume.
    async fn similar_perfumes(
        &self,
        perfume_id: &str,
        limit: usize,
    ) -> AppResult<Vec<RawRecommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
