/// Recommendation backend provider
///
/// Talks to the perfume recommendation service over REST:
/// `GET {api_url}/perfumes/{id}/similar?limit=N`
///
/// The endpoint has returned both a bare JSON array and an object wrapping
/// the array under `recommendations`; both are accepted.
use crate::{
    error::{AppError, AppResult},
    models::RawRecommendation,
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SimilarResponse {
    Wrapped {
        #[serde(default)]
        recommendations: Vec<RawRecommendation>,
    },
    Bare(Vec<RawRecommendation>),
}

impl From<SimilarResponse> for Vec<RawRecommendation> {
    fn from(response: SimilarResponse) -> Self {
        match response {
            SimilarResponse::Wrapped { recommendations } => recommendations,
            SimilarResponse::Bare(items) => items,
        }
    }
}

#[derive(Clone)]
pub struct BackendProvider {
    http_client: HttpClient,
    api_url: Url,
}

impl BackendProvider {
    /// Creates a provider for the backend rooted at `api_url`
    pub fn new(api_url: &str, timeout: Duration) -> AppResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid backend URL: {}", e)))?;

        if api_url.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!(
                "Backend URL cannot be used as a base: {}",
                api_url
            )));
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url,
        })
    }

    /// Builds `{api_url}/perfumes/{id}/similar`, percent-encoding the id
    fn similar_url(&self, perfume_id: &str) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::Internal("Backend URL cannot be used as a base".to_string())
            })?;
            segments
                .pop_if_empty()
                .extend(["perfumes", perfume_id, "similar"]);
        }
        Ok(url)
    }

    fn parse_similar_response(body: &str) -> AppResult<Vec<RawRecommendation>> {
        let response: SimilarResponse = serde_json::from_str(body).map_err(|e| {
            AppError::ExternalApi(format!("Malformed recommendation response: {}", e))
        })?;
        Ok(response.into())
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for BackendProvider {
    async fn similar_perfumes(
        &self,
        perfume_id: &str,
        limit: usize,
    ) -> AppResult<Vec<RawRecommendation>> {
        let url = self.similar_url(perfume_id)?;

        tracing::debug!(perfume_id = %perfume_id, limit, url = %url, "Fetching similar perfumes");

        let response = self
            .http_client
            .get(url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Perfume {} not found",
                perfume_id
            )));
        }
        if !status.is_success() {
            tracing::warn!(
                perfume_id = %perfume_id,
                status = %status,
                "Recommendation backend returned an error"
            );
            return Err(AppError::ExternalApi(format!(
                "Recommendation backend returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let items = Self::parse_similar_response(&body)?;

        tracing::info!(
            perfume_id = %perfume_id,
            count = items.len(),
            "Similar perfumes fetched"
        );

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_url: &str) -> BackendProvider {
        BackendProvider::new(api_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_similar_url() {
        let provider = create_test_provider("http://localhost:8000/api");
        let url = provider.similar_url("p-42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/perfumes/p-42/similar");
    }

    #[test]
    fn test_similar_url_with_trailing_slash() {
        let provider = create_test_provider("http://localhost:8000/api/");
        let url = provider.similar_url("17").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/perfumes/17/similar");
    }

    #[test]
    fn test_similar_url_encodes_id() {
        let provider = create_test_provider("http://localhost:8000");
        let url = provider.similar_url("a/b c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/perfumes/a%2Fb%20c/similar");
    }

    #[test]
    fn test_invalid_backend_url() {
        assert!(BackendProvider::new("not a url", Duration::from_secs(1)).is_err());
        assert!(BackendProvider::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_parse_bare_array() {
        let body = r#"[
            {"perfume": {"id": "p1", "brand": "Tom Ford"}, "similarityScore": 2.9, "sharedNotes": 3},
            {"perfume": {"id": "p2"}, "sharedNotes": 8}
        ]"#;

        let items = BackendProvider::parse_similar_response(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].perfume.brand, "Tom Ford");
        assert_eq!(items[0].similarity_score, 2.9);
        assert_eq!(items[1].shared_notes, 8);
    }

    #[test]
    fn test_parse_wrapped_response() {
        let body = r#"{"recommendations": [
            {"perfume": {"id": 5, "top_notes": "bergamot"}, "olfactiveProfile": {"FRESH": 6}}
        ]}"#;

        let items = BackendProvider::parse_similar_response(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].perfume.id, "5");
        assert_eq!(items[0].olfactive_profile.fresh, 6.0);
    }

    #[test]
    fn test_parse_malformed_response() {
        let result = BackendProvider::parse_similar_response("<html>oops</html>");
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(create_test_provider("http://localhost").name(), "backend");
    }
}
