pub mod feedback;
pub mod lenient;
pub mod perfume;
pub mod recommendation;

pub use feedback::{Feedback, FeedbackKind};
pub use perfume::{NoteInput, Perfume, PerfumeNotes, RawNoteTiers, RawPerfume};
pub use recommendation::{
    ExplainStrategy, ExplainedRecommendation, OlfactiveFamily, OlfactiveProfile,
    RawRecommendation, ReasonType, RecommendationReason, RecommendationSignal,
};
