use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{lenient, Perfume, RawPerfume};

/// Broad scent category the backend scores profile similarity on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OlfactiveFamily {
    Floral,
    Woody,
    Oriental,
    Fresh,
    Fruity,
    Gourmand,
}

impl OlfactiveFamily {
    /// Fixed iteration order; also the tie-break order for the dominant family
    pub const ALL: [OlfactiveFamily; 6] = [
        OlfactiveFamily::Floral,
        OlfactiveFamily::Woody,
        OlfactiveFamily::Oriental,
        OlfactiveFamily::Fresh,
        OlfactiveFamily::Fruity,
        OlfactiveFamily::Gourmand,
    ];

    /// Wire key, e.g. "WOODY"
    pub fn as_str(&self) -> &'static str {
        match self {
            OlfactiveFamily::Floral => "FLORAL",
            OlfactiveFamily::Woody => "WOODY",
            OlfactiveFamily::Oriental => "ORIENTAL",
            OlfactiveFamily::Fresh => "FRESH",
            OlfactiveFamily::Fruity => "FRUITY",
            OlfactiveFamily::Gourmand => "GOURMAND",
        }
    }

    /// Human-readable name, e.g. "Woody"
    pub fn display_name(&self) -> &'static str {
        match self {
            OlfactiveFamily::Floral => "Floral",
            OlfactiveFamily::Woody => "Woody",
            OlfactiveFamily::Oriental => "Oriental",
            OlfactiveFamily::Fresh => "Fresh",
            OlfactiveFamily::Fruity => "Fruity",
            OlfactiveFamily::Gourmand => "Gourmand",
        }
    }
}

impl Display for OlfactiveFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-family match scores between the source perfume and a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OlfactiveProfile {
    #[serde(rename = "FLORAL", alias = "floral", default, deserialize_with = "lenient::score")]
    pub floral: f64,
    #[serde(rename = "WOODY", alias = "woody", default, deserialize_with = "lenient::score")]
    pub woody: f64,
    #[serde(rename = "ORIENTAL", alias = "oriental", default, deserialize_with = "lenient::score")]
    pub oriental: f64,
    #[serde(rename = "FRESH", alias = "fresh", default, deserialize_with = "lenient::score")]
    pub fresh: f64,
    #[serde(rename = "FRUITY", alias = "fruity", default, deserialize_with = "lenient::score")]
    pub fruity: f64,
    #[serde(rename = "GOURMAND", alias = "gourmand", default, deserialize_with = "lenient::score")]
    pub gourmand: f64,
}

impl OlfactiveProfile {
    pub fn score(&self, family: OlfactiveFamily) -> f64 {
        let raw = match family {
            OlfactiveFamily::Floral => self.floral,
            OlfactiveFamily::Woody => self.woody,
            OlfactiveFamily::Oriental => self.oriental,
            OlfactiveFamily::Fresh => self.fresh,
            OlfactiveFamily::Fruity => self.fruity,
            OlfactiveFamily::Gourmand => self.gourmand,
        };
        lenient::non_negative(raw)
    }

    pub fn with_score(mut self, family: OlfactiveFamily, score: f64) -> Self {
        match family {
            OlfactiveFamily::Floral => self.floral = score,
            OlfactiveFamily::Woody => self.woody = score,
            OlfactiveFamily::Oriental => self.oriental = score,
            OlfactiveFamily::Fresh => self.fresh = score,
            OlfactiveFamily::Fruity => self.fruity = score,
            OlfactiveFamily::Gourmand => self.gourmand = score,
        }
        self
    }

    /// Scores in fixed family order
    pub fn entries(&self) -> impl Iterator<Item = (OlfactiveFamily, f64)> + '_ {
        OlfactiveFamily::ALL
            .into_iter()
            .map(move |family| (family, self.score(family)))
    }

    /// Highest-scoring family. On ties the family that comes first in
    /// [`OlfactiveFamily::ALL`] wins.
    pub fn dominant(&self) -> (OlfactiveFamily, f64) {
        self.entries()
            .fold((OlfactiveFamily::Floral, f64::NEG_INFINITY), |best, entry| {
                if entry.1 > best.1 {
                    entry
                } else {
                    best
                }
            })
    }
}

/// Similarity evidence the backend attaches to one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSignal {
    #[serde(default, alias = "similarity_score", deserialize_with = "lenient::score")]
    pub similarity_score: f64,
    #[serde(default, alias = "shared_notes", deserialize_with = "lenient::count")]
    pub shared_notes: u32,
    #[serde(default, alias = "olfactive_profile", deserialize_with = "lenient::or_default")]
    pub olfactive_profile: OlfactiveProfile,
}

/// One item of a backend recommendation response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub perfume: RawPerfume,
    #[serde(default, alias = "similarity_score", deserialize_with = "lenient::score")]
    pub similarity_score: f64,
    #[serde(default, alias = "shared_notes", deserialize_with = "lenient::count")]
    pub shared_notes: u32,
    #[serde(default, alias = "olfactive_profile", deserialize_with = "lenient::or_default")]
    pub olfactive_profile: OlfactiveProfile,
}

impl RawRecommendation {
    pub fn signal(&self) -> RecommendationSignal {
        RecommendationSignal {
            similarity_score: self.similarity_score,
            shared_notes: self.shared_notes,
            olfactive_profile: self.olfactive_profile,
        }
    }
}

/// Why a candidate was recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonType {
    SimilarNotes,
    SameBrand,
    SimilarFamily,
    PopularChoice,
    Complementary,
}

impl ReasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonType::SimilarNotes => "similar_notes",
            ReasonType::SameBrand => "same_brand",
            ReasonType::SimilarFamily => "similar_family",
            ReasonType::PopularChoice => "popular_choice",
            ReasonType::Complementary => "complementary",
        }
    }
}

impl Display for ReasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explanation attached to a single recommended candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReason {
    #[serde(rename = "type")]
    pub reason_type: ReasonType,
    /// Always within [0, 1]
    pub confidence: f64,
    pub details: String,
    pub matching_elements: Vec<String>,
}

/// Which reason-selection strategy produced an explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplainStrategy {
    /// First matching rule over backend similarity signals
    Signal,
    /// Highest-confidence reason from comparing two full perfume records
    Pairwise,
}

/// Normalized candidate paired with its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedRecommendation {
    /// Zero-based position in the list as received
    pub rank: usize,
    pub perfume: Perfume,
    pub reason: RecommendationReason,
    pub strategy: ExplainStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_olfactive_profile_deserialize_partial() {
        let profile: OlfactiveProfile =
            serde_json::from_str(r#"{"WOODY": 5, "FRESH": "1.5", "GOURMAND": null}"#).unwrap();
        assert_eq!(profile.woody, 5.0);
        assert_eq!(profile.fresh, 1.5);
        assert_eq!(profile.gourmand, 0.0);
        assert_eq!(profile.floral, 0.0);
    }

    #[test]
    fn test_dominant_family_highest_score() {
        let profile = OlfactiveProfile::default()
            .with_score(OlfactiveFamily::Fresh, 3.0)
            .with_score(OlfactiveFamily::Gourmand, 4.5);
        assert_eq!(profile.dominant(), (OlfactiveFamily::Gourmand, 4.5));
    }

    #[test]
    fn test_dominant_family_tie_breaks_on_fixed_order() {
        let profile = OlfactiveProfile::default()
            .with_score(OlfactiveFamily::Fruity, 6.0)
            .with_score(OlfactiveFamily::Woody, 6.0)
            .with_score(OlfactiveFamily::Oriental, 6.0);
        assert_eq!(profile.dominant(), (OlfactiveFamily::Woody, 6.0));
    }

    #[test]
    fn test_dominant_family_all_zero() {
        let profile = OlfactiveProfile::default();
        assert_eq!(profile.dominant(), (OlfactiveFamily::Floral, 0.0));
    }

    #[test]
    fn test_negative_family_score_reads_as_zero() {
        let profile = OlfactiveProfile::default().with_score(OlfactiveFamily::Woody, -9.0);
        assert_eq!(profile.score(OlfactiveFamily::Woody), 0.0);
    }

    #[test]
    fn test_raw_recommendation_deserialization() {
        let json = r#"{
            "perfume": {"id": "p9", "brand": "Maison Margiela", "top_notes": "pink pepper"},
            "similarityScore": 2.8,
            "sharedNotes": 4,
            "olfactiveProfile": {"FLORAL": 1, "WOODY": 3}
        }"#;

        let item: RawRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(item.perfume.id, "p9");

        let signal = item.signal();
        assert_eq!(signal.similarity_score, 2.8);
        assert_eq!(signal.shared_notes, 4);
        assert_eq!(signal.olfactive_profile.woody, 3.0);
    }

    #[test]
    fn test_raw_recommendation_missing_signal() {
        let item: RawRecommendation =
            serde_json::from_str(r#"{"perfume": {"id": "p1"}, "olfactiveProfile": null}"#)
                .unwrap();
        assert_eq!(item.signal(), RecommendationSignal::default());
    }

    #[test]
    fn test_reason_serialization() {
        let reason = RecommendationReason {
            reason_type: ReasonType::PopularChoice,
            confidence: 0.8,
            details: "A popular pick".to_string(),
            matching_elements: vec![],
        };

        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["type"], "popular_choice");
        assert_eq!(json["matchingElements"], serde_json::json!([]));
    }

    #[test]
    fn test_reason_type_display_matches_serde() {
        for reason_type in [
            ReasonType::SimilarNotes,
            ReasonType::SameBrand,
            ReasonType::SimilarFamily,
            ReasonType::PopularChoice,
            ReasonType::Complementary,
        ] {
            let json = serde_json::to_string(&reason_type).unwrap();
            assert_eq!(json, format!("\"{}\"", reason_type));
        }
    }
}
