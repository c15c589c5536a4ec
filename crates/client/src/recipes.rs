use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use fridgechef_core::{RecipeId, TransportError};
use fridgechef_recipes::{BookmarkService, CandidateRecipe, PersistedRecipe, RecipeDetails, RecipeGenerator};

use crate::http::ApiClient;
use crate::wire::{GenerateRequest, GenerateResponse, RecipeEnvelope, RecipeRecord};

/// [`RecipeGenerator`] and [`BookmarkService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpRecipeService {
    api: ApiClient,
}

impl HttpRecipeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch_details(&self, source_url: &str, persist: bool) -> Result<RecipeRecord, TransportError> {
        let mut url = self.api.url("generate-recipe-details")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("video_url", source_url);
            if !persist {
                query.append_pair("persist", "false");
            }
        }
        let envelope: RecipeEnvelope = self.api.send_json(self.api.request(Method::POST, url)).await?;
        Ok(envelope.recipe)
    }
}

#[async_trait]
impl RecipeGenerator for HttpRecipeService {
    async fn generate(&self, ingredients: &[String]) -> Result<Vec<CandidateRecipe>, TransportError> {
        let url = self.api.url("generate-recipe")?;
        let req = self.api.request(Method::POST, url).json(&GenerateRequest {
            ingredients: ingredients.to_vec(),
        });
        match self.api.send_json::<GenerateResponse>(req).await {
            Ok(resp) => Ok(resp.videos.into_iter().map(CandidateRecipe::from).collect()),
            // The backend answers 404 when the search finds no videos.
            Err(e) if e.status() == Some(404) => {
                info!(error = %e, "no recipe videos found");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn detail(&self, source_url: &str) -> Result<RecipeDetails, TransportError> {
        Ok(self.fetch_details(source_url, false).await?.details())
    }

    async fn detail_and_persist(&self, source_url: &str) -> Result<PersistedRecipe, TransportError> {
        self.fetch_details(source_url, true)
            .await?
            .into_persisted(source_url)
            .ok_or_else(|| TransportError::Parse("stored recipe has no id".to_string()))
    }
}

#[async_trait]
impl BookmarkService for HttpRecipeService {
    /// The star endpoint does not report the resulting state, so the liked
    /// list is read back after the toggle.
    async fn toggle(&self, id: RecipeId) -> Result<bool, TransportError> {
        let url = self.api.url(&format!("recipes/{id}/star"))?;
        self.api.send_empty(self.api.request(Method::POST, url)).await?;
        let liked = self.list_liked().await?;
        Ok(liked.iter().any(|r| r.id == id))
    }

    async fn list_liked(&self) -> Result<Vec<PersistedRecipe>, TransportError> {
        let url = self.api.url("recipes")?;
        let records: Vec<RecipeRecord> = self.api.send_json(self.api.request(Method::GET, url)).await?;
        Ok(records
            .into_iter()
            .filter_map(|r| r.into_persisted(""))
            .map(|r| PersistedRecipe { is_starred: true, ..r })
            .collect())
    }

    async fn get(&self, id: RecipeId) -> Result<PersistedRecipe, TransportError> {
        let url = self.api.url(&format!("recipes/{id}"))?;
        let record: RecipeRecord = self.api.send_json(self.api.request(Method::GET, url)).await?;
        record
            .into_persisted("")
            .ok_or_else(|| TransportError::Parse(format!("recipe {id} has no id")))
    }
}
