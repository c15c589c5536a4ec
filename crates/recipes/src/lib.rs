//! Recipe generation orchestrator.
//!
//! Turns a handful of ingredient names into candidate recipes, enriches the
//! candidates concurrently with degradation on failure, promotes one into a
//! persisted recipe and manages bookmarks.

pub mod error;
pub mod model;
pub mod orchestrator;
pub mod service;
pub mod text;

pub use error::{RecipeError, RecipeResult};
pub use model::{CandidateRecipe, EnrichedCandidate, PersistedRecipe, RecipeDetails, Settled};
pub use orchestrator::{MAX_INGREDIENTS, RecipeOrchestrator};
pub use service::{BookmarkService, RecipeGenerator};
pub use text::{split_quantity, thumbnail_for};
