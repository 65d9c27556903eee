use crate::models::{
    lenient, OlfactiveFamily, ReasonType, RecommendationReason, RecommendationSignal,
};

use super::popular_choice;

/// Shared-note count above which notes explain the match on their own
const STRONG_SHARED_NOTES: u32 = 6;
/// Family score above which the dominant family explains the match
const DOMINANT_FAMILY_SCORE: f64 = 4.0;
/// Raw similarity above which the score itself is the explanation
const HIGH_SIMILARITY: f64 = 2.5;
/// Similarity scores are mapped to confidence by dividing by this
const SIMILARITY_SCALE: f64 = 3.0;

const SIMILAR_NOTES_CAP: f64 = 0.95;
const SIMILAR_FAMILY_CAP: f64 = 0.9;
const COMPLEMENTARY_CAP: f64 = 0.85;
const POPULAR_CHOICE_FLOOR: f64 = 0.6;

/// Picks the explanation for one candidate from its backend signal.
///
/// Rules are checked in order and the first match wins:
/// 1. more than 6 shared notes
/// 2. a dominant olfactive family scoring above 4
/// 3. a raw similarity score above 2.5
/// 4. popular choice, decaying with `index`
///
/// Each rule caps its confidence below the previous rule's cap.
pub fn explain_signal(signal: &RecommendationSignal, index: usize) -> RecommendationReason {
    let similarity = lenient::non_negative(signal.similarity_score);
    let scaled = similarity / SIMILARITY_SCALE;

    let reason = if signal.shared_notes > STRONG_SHARED_NOTES {
        RecommendationReason {
            reason_type: ReasonType::SimilarNotes,
            confidence: scaled.min(SIMILAR_NOTES_CAP),
            details: format!(
                "Shares {} notes with the perfume you're viewing",
                signal.shared_notes
            ),
            matching_elements: vec![format!("{} shared notes", signal.shared_notes)],
        }
    } else if let Some((family, family_score)) = dominant_family(signal) {
        RecommendationReason {
            reason_type: ReasonType::SimilarFamily,
            confidence: scaled.min(SIMILAR_FAMILY_CAP),
            details: format!(
                "Strong {} character in common (family match {:.1})",
                family.display_name().to_lowercase(),
                family_score
            ),
            matching_elements: vec![family.display_name().to_string()],
        }
    } else if similarity > HIGH_SIMILARITY {
        RecommendationReason {
            reason_type: ReasonType::Complementary,
            confidence: scaled.min(COMPLEMENTARY_CAP),
            details: format!("High overall similarity score of {:.1}", similarity),
            matching_elements: vec![format!("{:.1} similarity", similarity)],
        }
    } else {
        popular_choice(index, POPULAR_CHOICE_FLOOR)
    };

    tracing::trace!(
        index,
        reason = %reason.reason_type,
        confidence = reason.confidence,
        "Selected signal explanation"
    );

    reason
}

fn dominant_family(signal: &RecommendationSignal) -> Option<(OlfactiveFamily, f64)> {
    let (family, score) = signal.olfactive_profile.dominant();
    (score > DOMINANT_FAMILY_SCORE).then_some((family, score))
}
