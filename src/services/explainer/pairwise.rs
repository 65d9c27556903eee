use std::collections::HashSet;

use crate::{
    models::{Perfume, ReasonType, RecommendationReason},
    services::notes::normalize_note,
};

use super::popular_choice;

/// Leading color words dropped before comparing notes ("white musk" ~ "musk")
const COLOR_PREFIXES: &[&str] = &["white", "black", "pink", "red", "blue", "green", "yellow"];

/// Trailing material words dropped before comparing notes ("rose absolute" ~ "rose")
const MATERIAL_SUFFIXES: &[&str] = &["oil", "extract", "absolute"];

/// Pairs of note families that balance each other
pub const COMPLEMENTARY_FAMILIES: &[(&str, &str)] = &[
    ("citrus", "woody"),
    ("floral", "spicy"),
    ("fresh", "warm"),
    ("light", "deep"),
    ("sweet", "dry"),
    ("aquatic", "oriental"),
];

const SAME_BRAND_CONFIDENCE: f64 = 0.85;
const SIMILAR_NOTES_BASE: f64 = 0.6;
const SIMILAR_NOTES_STEP: f64 = 0.1;
const SIMILAR_NOTES_CAP: f64 = 0.95;
const COMPLEMENTARY_CONFIDENCE: f64 = 0.75;
const POPULAR_CHOICE_FLOOR: f64 = 0.5;

/// Number of shared notes quoted in the details text
const QUOTED_NOTES: usize = 3;

/// Explains `candidate` by comparing it directly with `source`.
///
/// Every matching reason (same brand, shared notes, complementary families)
/// is scored and the one with the highest confidence is returned. Ties keep
/// the earlier reason in that order. The rank-decaying popular choice is
/// only used when none of them match.
pub fn explain_pair(source: &Perfume, candidate: &Perfume, index: usize) -> RecommendationReason {
    let best = [
        same_brand(source, candidate),
        similar_notes(source, candidate),
        complementary_profiles(source, candidate),
    ]
    .into_iter()
    .flatten()
    .reduce(|best, reason| {
        if reason.confidence > best.confidence {
            reason
        } else {
            best
        }
    });

    let reason = best.unwrap_or_else(|| popular_choice(index, POPULAR_CHOICE_FLOOR));

    tracing::trace!(
        source = %source.id,
        candidate = %candidate.id,
        reason = %reason.reason_type,
        confidence = reason.confidence,
        "Selected pairwise explanation"
    );

    reason
}

/// Comparison key for a note: normalized, minus one leading color word and
/// one trailing material word
pub fn comparison_key(note: &str) -> String {
    let normalized = normalize_note(note);
    let mut words: Vec<&str> = normalized.split(' ').collect();

    if words.len() > 1 && COLOR_PREFIXES.contains(&words[0]) {
        words.remove(0);
    }
    if words.len() > 1 && words.last().is_some_and(|w| MATERIAL_SUFFIXES.contains(w)) {
        words.pop();
    }

    words.join(" ")
}

fn same_brand(source: &Perfume, candidate: &Perfume) -> Option<RecommendationReason> {
    let source_brand = source.brand.trim();
    let candidate_brand = candidate.brand.trim();

    if source_brand.is_empty() || source_brand.to_lowercase() != candidate_brand.to_lowercase() {
        return None;
    }

    Some(RecommendationReason {
        reason_type: ReasonType::SameBrand,
        confidence: SAME_BRAND_CONFIDENCE,
        details: format!("Also from {}", candidate_brand),
        matching_elements: vec![candidate_brand.to_string()],
    })
}

fn similar_notes(source: &Perfume, candidate: &Perfume) -> Option<RecommendationReason> {
    let candidate_keys: HashSet<String> =
        candidate.all_notes().map(|n| comparison_key(n)).collect();

    // Source order, source display names
    let mut seen = HashSet::new();
    let mut shared_in_order = Vec::new();
    for note in source.all_notes() {
        let key = comparison_key(note);
        if key.is_empty() || !candidate_keys.contains(&key) {
            continue;
        }
        if seen.insert(key) {
            shared_in_order.push(note.clone());
        }
    }

    if shared_in_order.is_empty() {
        return None;
    }

    let count = shared_in_order.len();
    let confidence = (SIMILAR_NOTES_BASE + SIMILAR_NOTES_STEP * count as f64).min(SIMILAR_NOTES_CAP);
    let quoted = shared_in_order
        .iter()
        .take(QUOTED_NOTES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    let details = if count == 1 {
        format!("Shares a key note: {}", quoted)
    } else {
        format!("Shares {} notes including {}", count, quoted)
    };

    Some(RecommendationReason {
        reason_type: ReasonType::SimilarNotes,
        confidence,
        details,
        matching_elements: shared_in_order,
    })
}

fn complementary_profiles(source: &Perfume, candidate: &Perfume) -> Option<RecommendationReason> {
    let source_notes: Vec<String> = source.all_notes().map(|n| normalize_note(n)).collect();
    let candidate_notes: Vec<String> = candidate.all_notes().map(|n| normalize_note(n)).collect();

    let mentions = |notes: &[String], keyword: &str| notes.iter().any(|n| n.contains(keyword));

    let (source_side, candidate_side) = COMPLEMENTARY_FAMILIES.iter().find_map(|&(left, right)| {
        if mentions(&source_notes, left) && mentions(&candidate_notes, right) {
            Some((left, right))
        } else if mentions(&source_notes, right) && mentions(&candidate_notes, left) {
            Some((right, left))
        } else {
            None
        }
    })?;

    Some(RecommendationReason {
        reason_type: ReasonType::Complementary,
        confidence: COMPLEMENTARY_CONFIDENCE,
        details: format!(
            "Its {} side complements the {} character of your pick",
            candidate_side, source_side
        ),
        matching_elements: vec![source_side.to_string(), candidate_side.to_string()],
    })
}
