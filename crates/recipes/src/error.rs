use thiserror::Error;

use fridgechef_core::{DomainError, TransportError};

pub type RecipeResult<T> = Result<T, RecipeError>;

/// Failure of an orchestrator action.
///
/// Partial enrichment failures never show up here; they are absorbed into
/// degraded candidates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("recipe generation failed: {0}")]
    GenerationFailed(TransportError),
    #[error("could not save the recipe: {0}")]
    PromotionFailed(TransportError),
    #[error("bookmark request failed: {0}")]
    Bookmark(TransportError),
}
