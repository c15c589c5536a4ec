use serde::{Deserialize, Serialize};

use fridgechef_core::RecipeId;

/// A generated recipe idea keyed by its source video.
///
/// Ephemeral: it has no persisted id and lives only as long as the result list
/// that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecipe {
    pub source_url: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

/// Structured recipe content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub subtitle: String,
    pub ingredients: Vec<String>,
    pub seasonings: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeDetails {
    /// Content used for a candidate whose detail request failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitle.is_empty()
            && self.ingredients.is_empty()
            && self.seasonings.is_empty()
            && self.steps.is_empty()
    }
}

/// A candidate after enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    pub candidate: CandidateRecipe,
    pub details: RecipeDetails,
    /// Why enrichment failed; `details` is empty when set.
    pub failure: Option<String>,
}

impl EnrichedCandidate {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

/// A recipe stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecipe {
    pub id: RecipeId,
    pub title: String,
    pub details: RecipeDetails,
    pub source_url: String,
    pub is_starred: bool,
}

/// Outcome of one task of a fan-out that waits for every task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(String),
}

impl<T> Settled<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Settled::Fulfilled(value) => Some(value),
            Settled::Rejected(_) => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Settled<T>
where
    E: std::fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Settled::Fulfilled(value),
            Err(e) => Settled::Rejected(e.to_string()),
        }
    }
}
