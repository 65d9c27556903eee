use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{ExplainStrategy, ExplainedRecommendation, Perfume, RawPerfume, RawRecommendation},
    services::{
        explainer::{explain_pair, explain_signal},
        feedback::FeedbackStore,
        providers::RecommendationProvider,
    },
};

/// Explains a backend recommendation list
///
/// Each item's notes are normalized and its signal is run through the
/// first-match rule chain. Rank is the item's position in `items`; the
/// backend order is kept as is.
pub fn explain_recommendations(items: Vec<RawRecommendation>) -> Vec<ExplainedRecommendation> {
    items
        .into_iter()
        .enumerate()
        .map(|(rank, item)| {
            let signal = item.signal();
            let reason = explain_signal(&signal, rank);

            tracing::debug!(
                rank,
                perfume_id = %item.perfume.id,
                reason = %reason.reason_type,
                confidence = reason.confidence,
                "Explained recommendation"
            );

            ExplainedRecommendation {
                rank,
                perfume: Perfume::from(item.perfume),
                reason,
                strategy: ExplainStrategy::Signal,
            }
        })
        .collect()
}

/// Explains candidates against a source perfume without backend signals
///
/// Used when only full perfume records are at hand. Each candidate gets the
/// highest-confidence pairwise reason.
pub fn compare_perfumes(
    source: RawPerfume,
    candidates: Vec<RawPerfume>,
) -> Vec<ExplainedRecommendation> {
    let source = Perfume::from(source);

    candidates
        .into_iter()
        .enumerate()
        .map(|(rank, candidate)| {
            let candidate = Perfume::from(candidate);
            let reason = explain_pair(&source, &candidate, rank);

            ExplainedRecommendation {
                rank,
                perfume: candidate,
                reason,
                strategy: ExplainStrategy::Pairwise,
            }
        })
        .collect()
}

/// Drops recommendations for perfumes the user disliked
///
/// Ranks are left untouched, so a filtered list may have gaps.
pub fn filter_disliked(
    recommendations: Vec<ExplainedRecommendation>,
    disliked: &HashSet<String>,
) -> Vec<ExplainedRecommendation> {
    if disliked.is_empty() {
        return recommendations;
    }

    let before = recommendations.len();
    let kept: Vec<ExplainedRecommendation> = recommendations
        .into_iter()
        .filter(|r| !disliked.contains(&r.perfume.id))
        .collect();

    if kept.len() < before {
        tracing::debug!(removed = before - kept.len(), "Filtered disliked perfumes");
    }

    kept
}

/// Fetches and explains perfumes similar to `perfume_id`
pub async fn similar_perfumes(
    provider: &dyn RecommendationProvider,
    feedback: &dyn FeedbackStore,
    perfume_id: &str,
    limit: usize,
    include_disliked: bool,
) -> AppResult<Vec<ExplainedRecommendation>> {
    tracing::info!(
        perfume_id = %perfume_id,
        limit,
        provider = provider.name(),
        "Fetching similar perfumes"
    );

    let items = provider.similar_perfumes(perfume_id, limit).await?;
    let explained = explain_recommendations(items);

    if include_disliked {
        return Ok(explained);
    }

    let disliked = feedback.disliked().await;
    Ok(filter_disliked(explained, &disliked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{FeedbackKind, NoteInput, OlfactiveFamily, OlfactiveProfile, ReasonType},
        services::{feedback::InMemoryFeedbackStore, providers::MockRecommendationProvider},
    };
    use mockall::predicate::eq;

    fn raw_perfume(id: &str, brand: &str, top_notes: &str) -> RawPerfume {
        RawPerfume {
            id: id.to_string(),
            name: format!("Perfume {}", id),
            brand: brand.to_string(),
            top_notes: Some(NoteInput::from(top_notes)),
            ..Default::default()
        }
    }

    fn item(id: &str, score: f64, shared: u32, profile: OlfactiveProfile) -> RawRecommendation {
        RawRecommendation {
            perfume: raw_perfume(id, "Brand", "bergamot, pink pepper, Bergamot"),
            similarity_score: score,
            shared_notes: shared,
            olfactive_profile: profile,
        }
    }

    fn sample_items() -> Vec<RawRecommendation> {
        vec![
            item("p1", 1.2, 9, OlfactiveProfile::default()),
            item(
                "p2",
                2.1,
                2,
                OlfactiveProfile::default().with_score(OlfactiveFamily::Woody, 7.0),
            ),
            item("p3", 2.9, 1, OlfactiveProfile::default()),
            item("p4", 0.4, 0, OlfactiveProfile::default()),
        ]
    }

    #[test]
    fn test_explain_recommendations() {
        let explained = explain_recommendations(sample_items());

        let types: Vec<ReasonType> = explained.iter().map(|e| e.reason.reason_type).collect();
        assert_eq!(
            types,
            vec![
                ReasonType::SimilarNotes,
                ReasonType::SimilarFamily,
                ReasonType::Complementary,
                ReasonType::PopularChoice,
            ]
        );

        let ranks: Vec<usize> = explained.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);

        // popular choice at rank 3 is floored
        assert_eq!(explained[3].reason.confidence, 0.6);
        assert_eq!(explained[0].perfume.notes.top, vec!["Bergamot", "Pink Pepper"]);
        assert!(explained.iter().all(|e| e.strategy == ExplainStrategy::Signal));
    }

    #[test]
    fn test_explain_empty_list() {
        assert!(explain_recommendations(vec![]).is_empty());
    }

    #[test]
    fn test_compare_perfumes() {
        let source = raw_perfume("src", "Guerlain", "bergamot, lemon, vanilla");
        let candidates = vec![
            raw_perfume("c1", "GUERLAIN", "iris"),
            raw_perfume("c2", "Other", "Bergamot, Lemon Oil, Vanilla Absolute"),
            raw_perfume("c3", "Other", "oud"),
        ];

        let explained = compare_perfumes(source, candidates);
        assert_eq!(explained.len(), 3);
        assert_eq!(explained[0].reason.reason_type, ReasonType::SameBrand);
        assert_eq!(explained[1].reason.reason_type, ReasonType::SimilarNotes);
        assert_eq!(
            explained[1].reason.matching_elements,
            vec!["Bergamot", "Lemon", "Vanilla"]
        );
        assert_eq!(explained[2].reason.reason_type, ReasonType::PopularChoice);
        assert!((explained[2].reason.confidence - 0.6).abs() < 1e-9);
        assert!(explained.iter().all(|e| e.strategy == ExplainStrategy::Pairwise));
    }

    #[test]
    fn test_filter_disliked_keeps_ranks() {
        let explained = explain_recommendations(sample_items());
        let disliked: HashSet<String> = ["p2".to_string()].into_iter().collect();

        let kept = filter_disliked(explained, &disliked);
        let ids: Vec<&str> = kept.iter().map(|e| e.perfume.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3", "p4"]);
        assert_eq!(kept[1].rank, 2);
    }

    #[tokio::test]
    async fn test_similar_perfumes_filters_disliked() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_similar_perfumes()
            .with(eq("src"), eq(10usize))
            .times(1)
            .returning(|_, _| Ok(sample_items()));
        provider.expect_name().return_const("mock");

        let feedback = InMemoryFeedbackStore::new();
        feedback.record("p3", FeedbackKind::Dislike).await;
        feedback.record("p1", FeedbackKind::Like).await;

        let result = similar_perfumes(&provider, &feedback, "src", 10, false)
            .await
            .unwrap();
        let ids: Vec<&str> = result.iter().map(|e| e.perfume.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p4"]);
    }

    #[tokio::test]
    async fn test_similar_perfumes_include_disliked() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_similar_perfumes()
            .returning(|_, _| Ok(sample_items()));
        provider.expect_name().return_const("mock");

        let feedback = InMemoryFeedbackStore::new();
        feedback.record("p3", FeedbackKind::Dislike).await;

        let result = similar_perfumes(&provider, &feedback, "src", 4, true)
            .await
            .unwrap();
        assert_eq!(result.len(), 4);
    }

    #[tokio::test]
    async fn test_similar_perfumes_propagates_provider_error() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_similar_perfumes()
            .returning(|id, _| Err(AppError::NotFound(format!("Perfume {} not found", id))));
        provider.expect_name().return_const("mock");

        let feedback = InMemoryFeedbackStore::new();
        let result = similar_perfumes(&provider, &feedback, "missing", 5, false).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
