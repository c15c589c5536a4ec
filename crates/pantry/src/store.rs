//! Ingredient persistence collaborator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fridgechef_core::{IngredientId, TransportError};

use crate::ingredient::Ingredient;

/// Authoritative ingredient storage (the backend).
///
/// Returned records carry server-assigned ids; their `category` is ignored by
/// the pantry and re-derived locally.
#[async_trait]
pub trait IngredientStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Ingredient>, TransportError>;

    async fn create(&self, ingredient: &Ingredient) -> Result<Ingredient, TransportError>;

    async fn update(&self, id: IngredientId, ingredient: &Ingredient) -> Result<Ingredient, TransportError>;

    async fn delete(&self, id: IngredientId) -> Result<(), TransportError>;
}

#[async_trait]
impl<S> IngredientStore for Arc<S>
where
    S: IngredientStore + ?Sized,
{
    async fn fetch_all(&self) -> Result<Vec<Ingredient>, TransportError> {
        (**self).fetch_all().await
    }

    async fn create(&self, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        (**self).create(ingredient).await
    }

    async fn update(&self, id: IngredientId, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        (**self).update(id, ingredient).await
    }

    async fn delete(&self, id: IngredientId) -> Result<(), TransportError> {
        (**self).delete(id).await
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    items: Vec<Ingredient>,
    offline: bool,
    fetches: usize,
}

/// In-memory ingredient storage for tests/dev.
///
/// Assigns increasing ids on create. While offline every call fails with a
/// network error and nothing changes.
#[derive(Debug, Default)]
pub struct InMemoryIngredientStore {
    inner: Mutex<InMemoryState>,
}

impl InMemoryIngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`.
    ///
    /// Missing ids are assigned above every id seen so far; later creates
    /// never reuse a seeded id.
    pub fn with_items(items: impl IntoIterator<Item = Ingredient>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.inner.lock() {
            for mut item in items {
                let id = match item.id {
                    Some(id) => {
                        state.next_id = state.next_id.max(id.get());
                        id
                    }
                    None => {
                        state.next_id += 1;
                        IngredientId::new(state.next_id)
                    }
                };
                item.id = Some(id);
                state.items.push(item);
            }
        }
        store
    }

    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.inner.lock() {
            state.offline = offline;
        }
    }

    /// Number of `fetch_all` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.inner.lock().map(|s| s.fetches).unwrap_or_default()
    }

    /// Snapshot of the stored records.
    pub fn snapshot(&self) -> Vec<Ingredient> {
        self.inner.lock().map(|s| s.items.clone()).unwrap_or_default()
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> Result<T, TransportError>,
    ) -> Result<T, TransportError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| TransportError::Network("store lock poisoned".to_string()))?;
        if state.offline {
            return Err(TransportError::Network("store is offline".to_string()));
        }
        f(&mut state)
    }
}

#[async_trait]
impl IngredientStore for InMemoryIngredientStore {
    async fn fetch_all(&self) -> Result<Vec<Ingredient>, TransportError> {
        self.with_state(|state| {
            state.fetches += 1;
            Ok(state.items.clone())
        })
    }

    async fn create(&self, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        self.with_state(|state| {
            state.next_id += 1;
            let mut stored = ingredient.clone();
            stored.id = Some(IngredientId::new(state.next_id));
            state.items.push(stored.clone());
            Ok(stored)
        })
    }

    async fn update(&self, id: IngredientId, ingredient: &Ingredient) -> Result<Ingredient, TransportError> {
        self.with_state(|state| {
            let slot = state
                .items
                .iter_mut()
                .find(|i| i.id == Some(id))
                .ok_or_else(|| TransportError::api(404, format!("ingredient {id} not found")))?;
            let image_url = slot.image_url.take();
            *slot = Ingredient {
                id: Some(id),
                image_url: ingredient.image_url.clone().or(image_url),
                ..ingredient.clone()
            };
            Ok(slot.clone())
        })
    }

    async fn delete(&self, id: IngredientId) -> Result<(), TransportError> {
        self.with_state(|state| {
            let before = state.items.len();
            state.items.retain(|i| i.id != Some(id));
            if state.items.len() == before {
                return Err(TransportError::api(404, format!("ingredient {id} not found")));
            }
            Ok(())
        })
    }
}
