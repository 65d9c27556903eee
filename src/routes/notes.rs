use axum::Json;

use crate::models::{Perfume, PerfumeNotes, RawPerfume};

/// Normalizes the note fields of a raw perfume record
pub async fn normalize(Json(raw): Json<RawPerfume>) -> Json<PerfumeNotes> {
    let perfume = Perfume::from(raw);

    if perfume.notes.is_empty() {
        tracing::debug!(perfume_id = %perfume.id, "Perfume has no notes listed");
    }

    Json(perfume.notes)
}
