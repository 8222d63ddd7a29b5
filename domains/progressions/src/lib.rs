//! Progressions domain: per-project lifecycle tracking through ordered states

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Progression, ProgressionListItem, ProgressionState};
pub use domain::service::ProgressionService;
pub use domain::validation::{ProgressionInput, ProgressionValidator, ValidProgression, MAX_STATES};

// Re-export repository types
pub use repository::{InMemoryProgressionStore, ProgressionRepository, ProgressionStore};

// Re-export API types
pub use api::routes;
pub use api::ProgressionsState;
