use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User reaction to a recommended perfume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
}

/// Latest feedback a user left on a perfume
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub perfume_id: String,
    pub kind: FeedbackKind,
    pub recorded_at: DateTime<Utc>,
}

impl Feedback {
    /// Creates feedback stamped with the current time
    pub fn new(perfume_id: String, kind: FeedbackKind) -> Self {
        Self {
            perfume_id,
            kind,
            recorded_at: Utc::now(),
        }
    }

    pub fn is_dislike(&self) -> bool {
        self.kind == FeedbackKind::Dislike
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_feedback() {
        let feedback = Feedback::new("p1".to_string(), FeedbackKind::Dislike);
        assert_eq!(feedback.perfume_id, "p1");
        assert!(feedback.is_dislike());
    }

    #[test]
    fn test_feedback_kind_serialization() {
        assert_eq!(serde_json::to_string(&FeedbackKind::Like).unwrap(), "\"like\"");
        assert_eq!(
            serde_json::from_str::<FeedbackKind>("\"dislike\"").unwrap(),
            FeedbackKind::Dislike
        );
    }
}
