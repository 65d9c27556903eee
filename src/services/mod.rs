pub mod explainer;
pub mod feedback;
pub mod notes;
pub mod providers;
pub mod recommendations;
