//! Perfume note normalization and recommendation explanations.
//!
//! The core is two pure components:
//!
//! - [`services::notes`] turns raw note fields into deduplicated,
//!   display-ready note names.
//! - [`services::explainer`] turns backend similarity signals (or a direct
//!   comparison of two perfumes) into a confidence-scored, human-readable
//!   reason for each recommended candidate.
//!
//! [`routes`] exposes both over HTTP next to a thin client for the external
//! recommendation backend.
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use services::explainer::{explain_pair, explain_signal};
pub use services::notes::{format_note, is_compound_note, normalize_note, parse_note_field};
