use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use fridgechef_core::{DomainError, RecipeId, SessionContext};

use crate::error::{RecipeError, RecipeResult};
use crate::model::{CandidateRecipe, EnrichedCandidate, PersistedRecipe, RecipeDetails, Settled};
use crate::service::{BookmarkService, RecipeGenerator};

/// Most ingredient names accepted by one generation request.
pub const MAX_INGREDIENTS: usize = 3;

/// Drives generation, enrichment, promotion and bookmarks for one session.
pub struct RecipeOrchestrator<G, B> {
    generator: Arc<G>,
    bookmarks: Arc<B>,
    session: SessionContext,
}

impl<G, B> RecipeOrchestrator<G, B>
where
    G: RecipeGenerator + 'static,
    B: BookmarkService,
{
    pub fn new(generator: Arc<G>, bookmarks: Arc<B>, session: SessionContext) -> Self {
        Self {
            generator,
            bookmarks,
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Candidate recipes for 1 to 3 ingredient names.
    ///
    /// Invalid input is rejected before any request. An empty result is a
    /// valid "nothing found" outcome.
    pub async fn generate_candidates(&self, names: &[String]) -> RecipeResult<Vec<CandidateRecipe>> {
        let names = validate_names(names)?;
        info!(session = %self.session.session_id(), ingredients = ?names, "generating recipes");

        let candidates = self
            .generator
            .generate(&names)
            .await
            .map_err(RecipeError::GenerationFailed)?;

        if candidates.is_empty() {
            info!(session = %self.session.session_id(), "no recipes found");
        } else {
            debug!(count = candidates.len(), "recipes generated");
        }
        Ok(candidates)
    }

    /// One detail request per candidate, all in flight at once. The result is
    /// aligned with `candidates`.
    pub async fn enrich_settled(&self, candidates: &[CandidateRecipe]) -> Vec<Settled<RecipeDetails>> {
        settle_details(self.generator.as_ref(), candidates).await
    }

    /// Enrich every candidate. Failed candidates keep title/thumbnail/url with
    /// empty content; this never fails as a whole.
    pub async fn enrich(&self, candidates: &[CandidateRecipe]) -> Vec<EnrichedCandidate> {
        enrich_with(self.generator.as_ref(), candidates).await
    }

    /// Generate, then enrich.
    pub async fn recommend(&self, names: &[String]) -> RecipeResult<Vec<EnrichedCandidate>> {
        let candidates = self.generate_candidates(names).await?;
        Ok(self.enrich(&candidates).await)
    }

    /// Run [`Self::enrich`] in the background.
    ///
    /// Dropping the receiver abandons the result; the task still runs to
    /// completion and its output is discarded.
    pub fn spawn_enrichment(&self, candidates: Vec<CandidateRecipe>) -> oneshot::Receiver<Vec<EnrichedCandidate>> {
        let (tx, rx) = oneshot::channel();
        let generator = Arc::clone(&self.generator);
        let session = self.session.session_id();
        tokio::spawn(async move {
            let enriched = enrich_with(generator.as_ref(), &candidates).await;
            if tx.send(enriched).is_err() {
                debug!(session = %session, "enrichment finished after its receiver was dropped");
            }
        });
        rx
    }

    /// Detail-and-persist a candidate; the only way to obtain a recipe id.
    pub async fn promote(&self, candidate: &CandidateRecipe) -> RecipeResult<PersistedRecipe> {
        let recipe = self
            .generator
            .detail_and_persist(&candidate.source_url)
            .await
            .map_err(|e| {
                warn!(session = %self.session.session_id(), source = %candidate.source_url, error = %e, "promotion failed");
                RecipeError::PromotionFailed(e)
            })?;
        info!(session = %self.session.session_id(), recipe_id = %recipe.id, "recipe promoted");
        Ok(recipe)
    }

    /// Flip a bookmark; returns the new state.
    pub async fn toggle_bookmark(&self, id: RecipeId) -> RecipeResult<bool> {
        let starred = self.bookmarks.toggle(id).await.map_err(RecipeError::Bookmark)?;
        info!(session = %self.session.session_id(), recipe_id = %id, starred, "bookmark toggled");
        Ok(starred)
    }

    pub async fn liked_recipes(&self) -> RecipeResult<Vec<PersistedRecipe>> {
        self.bookmarks.list_liked().await.map_err(RecipeError::Bookmark)
    }

    pub async fn recipe(&self, id: RecipeId) -> RecipeResult<PersistedRecipe> {
        self.bookmarks.get(id).await.map_err(RecipeError::Bookmark)
    }
}

fn validate_names(names: &[String]) -> Result<Vec<String>, DomainError> {
    if names.is_empty() || names.len() > MAX_INGREDIENTS {
        return Err(DomainError::validation(format!(
            "between 1 and {MAX_INGREDIENTS} ingredients are required, got {}",
            names.len()
        )));
    }
    names
        .iter()
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(DomainError::validation("ingredient names must not be empty"))
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}

async fn settle_details<G>(generator: &G, candidates: &[CandidateRecipe]) -> Vec<Settled<RecipeDetails>>
where
    G: RecipeGenerator + ?Sized,
{
    let requests = candidates.iter().map(|c| generator.detail(&c.source_url));
    join_all(requests).await.into_iter().map(Settled::from).collect()
}

async fn enrich_with<G>(generator: &G, candidates: &[CandidateRecipe]) -> Vec<EnrichedCandidate>
where
    G: RecipeGenerator + ?Sized,
{
    let settled = settle_details(generator, candidates).await;
    let enriched: Vec<EnrichedCandidate> = candidates
        .iter()
        .cloned()
        .zip(settled)
        .map(|(candidate, outcome)| match outcome {
            Settled::Fulfilled(details) => EnrichedCandidate {
                candidate,
                details,
                failure: None,
            },
            Settled::Rejected(reason) => {
                warn!(source = %candidate.source_url, reason = %reason, "recipe details unavailable");
                EnrichedCandidate {
                    candidate,
                    details: RecipeDetails::empty(),
                    failure: Some(reason),
                }
            }
        })
        .collect();

    let degraded = enriched.iter().filter(|c| c.is_degraded()).count();
    info!(total = enriched.len(), degraded, "enrichment settled");
    enriched
}
