//! Recommendation explanations
//!
//! Two independent reason-selection strategies live here:
//!
//! - [`signal`]: evaluates backend similarity signals against an ordered rule
//!   list; the first rule that matches wins.
//! - [`pairwise`]: compares two full perfume records when no backend signal
//!   is available; every matching reason is scored and the highest
//!   confidence wins.
//!
//! The two selection policies differ on purpose and are kept apart.
use crate::models::{ReasonType, RecommendationReason};

pub mod pairwise;
pub mod signal;

pub use pairwise::explain_pair;
pub use signal::explain_signal;

/// Confidence of the rank-position fallback before decay
const POPULAR_CHOICE_BASE: f64 = 0.8;
/// Confidence lost per rank position
const POPULAR_CHOICE_DECAY: f64 = 0.1;

/// Fallback reason whose confidence decays with rank position down to `floor`
pub(crate) fn popular_choice(index: usize, floor: f64) -> RecommendationReason {
    let confidence = (POPULAR_CHOICE_BASE - index as f64 * POPULAR_CHOICE_DECAY).max(floor);

    RecommendationReason {
        reason_type: ReasonType::PopularChoice,
        confidence,
        details: "A popular pick among fragrance lovers with similar taste".to_string(),
        matching_elements: Vec::new(),
    }
}
