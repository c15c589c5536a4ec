use async_trait::async_trait;
use reqwest::Method;

use fridgechef_core::{IngredientId, TransportError};
use fridgechef_pantry::{Ingredient, IngredientStore};

use crate::http::ApiClient;
use crate::wire::{IngredientList, IngredientPayload, IngredientRecord};

/// [`IngredientStore`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpIngredientStore {
    api: ApiClient,
}

impl HttpIngredientStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl IngredientStore for HttpIngredientStore {
    async fn fetch_all(&self) -> Result<Vec<Ingredient>, TransportError> {
        let url = self.api.url("user-ingredients")?;
        let list: IngredientList = self.api.send_json(self.api.request(Method::GET, url)).await?;
        Ok(list.ingredients.into_iter().map(Ingredient::from).collect())
    }

    async fn create(&self, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        let url = self.api.url("ingredients")?;
        let req = self
            .api
            .request(Method::POST, url)
            .json(&IngredientPayload::from(ingredient));
        let record: IngredientRecord = self.api.send_json(req).await?;
        Ok(record.into())
    }

    async fn update(&self, id: IngredientId, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        let url = self.api.url(&format!("ingredients/{id}"))?;
        let req = self
            .api
            .request(Method::PUT, url)
            .json(&IngredientPayload::from(ingredient));
        let record: IngredientRecord = self.api.send_json(req).await?;
        Ok(record.into())
    }

    async fn delete(&self, id: IngredientId) -> Result<(), TransportError> {
        let url = self.api.url(&format!("ingredients/{id}"))?;
        self.api.send_empty(self.api.request(Method::DELETE, url)).await
    }
}
