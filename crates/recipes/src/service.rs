//! Remote collaborators of the orchestrator.

use std::sync::Arc;

use async_trait::async_trait;

use fridgechef_core::{RecipeId, TransportError};

use crate::model::{CandidateRecipe, PersistedRecipe, RecipeDetails};

/// Recipe generation backend.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Candidates for the given ingredient names, in backend order. An empty
    /// list means nothing was found.
    async fn generate(&self, ingredients: &[String]) -> Result<Vec<CandidateRecipe>, TransportError>;

    /// Structured content for a source video, without storing anything.
    async fn detail(&self, source_url: &str) -> Result<RecipeDetails, TransportError>;

    /// Structured content for a source video, stored as a new recipe.
    async fn detail_and_persist(&self, source_url: &str) -> Result<PersistedRecipe, TransportError>;
}

/// Bookmarks ("likes") on persisted recipes.
#[async_trait]
pub trait BookmarkService: Send + Sync {
    /// Flip the bookmark; returns whether the recipe is now bookmarked.
    async fn toggle(&self, id: RecipeId) -> Result<bool, TransportError>;

    async fn list_liked(&self) -> Result<Vec<PersistedRecipe>, TransportError>;

    async fn get(&self, id: RecipeId) -> Result<PersistedRecipe, TransportError>;
}

#[async_trait]
impl<G> RecipeGenerator for Arc<G>
where
    G: RecipeGenerator + ?Sized,
{
    async fn generate(&self, ingredients: &[String]) -> Result<Vec<CandidateRecipe>, TransportError> {
        (**self).generate(ingredients).await
    }

    async fn detail(&self, source_url: &str) -> Result<RecipeDetails, TransportError> {
        (**self).detail(source_url).await
    }

    async fn detail_and_persist(&self, source_url: &str) -> Result<PersistedRecipe, TransportError> {
        (**self).detail_and_persist(source_url).await
    }
}

#[async_trait]
impl<B> BookmarkService for Arc<B>
where
    B: BookmarkService + ?Sized,
{
    async fn toggle(&self, id: RecipeId) -> Result<bool, TransportError> {
        (**self).toggle(id).await
    }

    async fn list_liked(&self) -> Result<Vec<PersistedRecipe>, TransportError> {
        (**self).list_liked().await
    }

    async fn get(&self, id: RecipeId) -> Result<PersistedRecipe, TransportError> {
        (**self).get(id).await
    }
}
