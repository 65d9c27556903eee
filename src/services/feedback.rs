use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Feedback, FeedbackKind};

/// Key-value store of like/dislike feedback, keyed by perfume id
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Records feedback, replacing any earlier feedback on the same perfume
    async fn record(&self, perfume_id: &str, kind: FeedbackKind) -> Feedback;

    async fn get(&self, perfume_id: &str) -> Option<Feedback>;

    /// All feedback, oldest first
    async fn all(&self) -> Vec<Feedback>;

    /// Ids of perfumes whose latest feedback is a dislike
    async fn disliked(&self) -> HashSet<String> {
        self.all()
            .await
            .into_iter()
            .filter(Feedback::is_dislike)
            .map(|f| f.perfume_id)
            .collect()
    }
}

/// Process-local feedback store
#[derive(Clone, Default)]
pub struct InMemoryFeedbackStore {
    inner: Arc<RwLock<HashMap<String, Feedback>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn record(&self, perfume_id: &str, kind: FeedbackKind) -> Feedback {
        let feedback = Feedback::new(perfume_id.to_string(), kind);
        self.inner
            .write()
            .await
            .insert(perfume_id.to_string(), feedback.clone());

        tracing::debug!(perfume_id = %perfume_id, kind = ?kind, "Feedback recorded");

        feedback
    }

    async fn get(&self, perfume_id: &str) -> Option<Feedback> {
        self.inner.read().await.get(perfume_id).cloned()
    }

    async fn all(&self) -> Vec<Feedback> {
        let mut all: Vec<Feedback> = self.inner.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        all
    }
}
