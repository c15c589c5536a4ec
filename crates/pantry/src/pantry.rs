use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use fridgechef_core::{DomainError, IngredientId, SessionContext};
use fridgechef_policy::ShelfLifePolicy;

use crate::editor::IngredientEditor;
use crate::error::PantryResult;
use crate::grouping::{CategoryGroup, group_by_category};
use crate::ingredient::Ingredient;
use crate::selection::{CAPACITY_WARNING, MAX_SELECTION, Selection, SelectionChange};
use crate::store::IngredientStore;

/// The session's ingredient collection.
///
/// A read-through cache of the store: every mutation goes to the store first
/// and creates/updates are followed by a full reload. A failed call leaves the
/// cached collection and the selection untouched.
pub struct Pantry<S> {
    store: S,
    policy: Arc<ShelfLifePolicy>,
    session: SessionContext,
    items: Vec<Ingredient>,
    selection: Selection,
}

impl<S> Pantry<S>
where
    S: IngredientStore,
{
    pub fn new(store: S, policy: Arc<ShelfLifePolicy>, session: SessionContext) -> Self {
        Self {
            store,
            policy,
            session,
            items: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub fn policy(&self) -> &Arc<ShelfLifePolicy> {
        &self.policy
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the collection with the store's current contents.
    pub async fn load(&mut self) -> PantryResult<()> {
        let fetched = self.store.fetch_all().await?;
        let fetched_count = fetched.len();

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(fetched_count);
        for mut item in fetched {
            let Some(id) = item.id else {
                warn!(session = %self.session.session_id(), name = %item.name, "dropping stored ingredient without id");
                continue;
            };
            if !seen.insert(id) {
                warn!(session = %self.session.session_id(), ingredient_id = %id, "dropping duplicate ingredient");
                continue;
            }
            item.category = self.policy.category_of(&item.name).to_string();
            items.push(item);
        }

        self.items = items;
        self.selection.retain(|id| seen.contains(&id));
        info!(
            session = %self.session.session_id(),
            fetched = fetched_count,
            kept = self.items.len(),
            "pantry loaded"
        );
        Ok(())
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn get(&self, id: IngredientId) -> Option<&Ingredient> {
        self.items.iter().find(|i| i.id == Some(id))
    }

    pub fn group(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.items, self.policy.categories())
    }

    /// Flip `id` in the selection.
    ///
    /// A full selection yields [`SelectionChange::AtCapacity`] and stays as it
    /// was. Unknown ids are rejected.
    pub fn toggle_selection(&mut self, id: IngredientId) -> PantryResult<SelectionChange> {
        if self.get(id).is_none() {
            return Err(DomainError::not_found().into());
        }
        let change = self.selection.toggle(id);
        match change {
            SelectionChange::AtCapacity => {
                warn!(session = %self.session.session_id(), ingredient_id = %id, "{CAPACITY_WARNING}");
            }
            _ => debug!(ingredient_id = %id, ?change, selected = self.selection.len(), "selection toggled"),
        }
        Ok(change)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Names of the selected ingredients, in collection order.
    pub fn selected_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| i.id.is_some_and(|id| self.selection.contains(id)))
            .map(|i| i.name.clone())
            .collect()
    }

    /// Names to hand to the recipe search. Needs 1 to 3 selected ingredients.
    pub fn start_cooking(&self) -> PantryResult<Vec<String>> {
        let names = self.selected_names();
        if names.is_empty() {
            return Err(DomainError::validation("select at least one ingredient").into());
        }
        if names.len() > MAX_SELECTION {
            return Err(DomainError::validation(CAPACITY_WARNING).into());
        }
        info!(session = %self.session.session_id(), ingredients = ?names, "start cooking");
        Ok(names)
    }

    /// Navigation away: the selection does not survive.
    pub fn leave(&mut self) {
        self.selection.clear();
    }

    /// Create (no id) or update (id set), then reload.
    ///
    /// The record sent to the store always carries the resolved category.
    /// Creates fill a missing added date with the session's today and a
    /// missing expire date from the shelf-life policy. Updates must carry an
    /// expire date.
    pub async fn upsert(&mut self, ingredient: Ingredient) -> PantryResult<()> {
        let name = ingredient.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("ingredient name is empty").into());
        }
        let mut record = Ingredient {
            name: name.to_string(),
            category: self.policy.category_of(name).to_string(),
            ..ingredient
        };

        match record.id {
            Some(id) => {
                if record.expire_date.is_none() {
                    return Err(DomainError::validation("an expire date is required to update an ingredient").into());
                }
                self.store.update(id, &record).await?;
                info!(session = %self.session.session_id(), ingredient_id = %id, "ingredient updated");
            }
            None => {
                let added = *record.added_date.get_or_insert_with(|| self.session.today());
                if record.expire_date.is_none() {
                    record.expire_date = Some(self.policy.compute_expiration(added, &record.name, record.is_frozen));
                }
                let stored = self.store.create(&record).await?;
                info!(session = %self.session.session_id(), ingredient_id = ?stored.id, name = %stored.name, "ingredient created");
            }
        }

        self.load().await
    }

    /// Delete from the store, then drop locally without a reload.
    pub async fn remove(&mut self, id: IngredientId) -> PantryResult<()> {
        self.store.delete(id).await?;
        self.items.retain(|i| i.id != Some(id));
        self.selection.retain(|x| x != id);
        info!(session = %self.session.session_id(), ingredient_id = %id, "ingredient removed");
        Ok(())
    }

    /// Ingredients with 0 to `days` days left, soonest first.
    pub fn expiring_within(&self, today: NaiveDate, days: i64) -> Vec<&Ingredient> {
        let mut soon: Vec<&Ingredient> = self
            .items
            .iter()
            .filter(|i| {
                i.expire_date
                    .is_some_and(|expire| ShelfLifePolicy::is_expiring_soon(expire, today, days))
            })
            .collect();
        soon.sort_by_key(|i| i.expire_date);
        soon
    }

    /// A fresh editor sharing this pantry's policy and today.
    pub fn editor(&self) -> IngredientEditor {
        IngredientEditor::new(Arc::clone(&self.policy), self.session.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PantryError;
    use crate::store::InMemoryIngredientStore;
    use fridgechef_core::TransportError;
    use fridgechef_policy::{EXPIRY_WARNING_DAYS, OTHER_CATEGORY};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 5, 1)
    }

    fn stored(id: i64, name: &str, expire: NaiveDate) -> Ingredient {
        Ingredient::draft(name)
            .with_id(IngredientId::new(id))
            .with_dates(today(), expire)
    }

    fn pantry_with(items: Vec<Ingredient>) -> Pantry<Arc<InMemoryIngredientStore>> {
        let store = Arc::new(InMemoryIngredientStore::with_items(items));
        Pantry::new(
            store,
            Arc::new(ShelfLifePolicy::builtin()),
            SessionContext::new().with_today(today()),
        )
    }

    fn id(n: i64) -> IngredientId {
        IngredientId::new(n)
    }

    #[tokio::test]
    async fn load_resolves_categories_and_drops_duplicates() {
        let mut pantry = pantry_with(vec![
            stored(1, "우유", ymd(2024, 5, 8)),
            stored(2, "mystery", ymd(2024, 5, 31)),
            stored(1, "계란", ymd(2024, 5, 15)),
        ]);
        pantry.load().await.unwrap();

        let ids: Vec<i64> = pantry.items().iter().map(|i| i.id.unwrap().get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(pantry.get(id(1)).unwrap().category, "Dairy");
        assert_eq!(pantry.get(id(2)).unwrap().category, OTHER_CATEGORY);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_collection() {
        let mut pantry = pantry_with(vec![stored(1, "우유", ymd(2024, 5, 8))]);
        pantry.load().await.unwrap();

        pantry.store().set_offline(true);
        let err = pantry.load().await.unwrap_err();
        assert!(matches!(err, PantryError::Transport(TransportError::Network(_))));
        assert_eq!(pantry.items().len(), 1);
    }

    #[tokio::test]
    async fn capacity_scenario() {
        let mut pantry = pantry_with((1..=4).map(|n| stored(n, "두부", ymd(2024, 5, 8))).collect());
        pantry.load().await.unwrap();

        for n in 1..=3 {
            assert_eq!(pantry.toggle_selection(id(n)).unwrap(), SelectionChange::Added);
        }
        assert_eq!(pantry.toggle_selection(id(4)).unwrap(), SelectionChange::AtCapacity);
        assert!(pantry.selection().is_full());
        assert!(!pantry.selection().contains(id(4)));

        assert_eq!(pantry.toggle_selection(id(2)).unwrap(), SelectionChange::Removed);
        let mut ids: Vec<i64> = pantry.selection().ids().iter().map(|i| i.get()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn toggling_unknown_id_is_rejected() {
        let mut pantry = pantry_with(vec![]);
        pantry.load().await.unwrap();
        let err = pantry.toggle_selection(id(42)).unwrap_err();
        assert_eq!(err, PantryError::Validation(DomainError::NotFound));
    }

    #[tokio::test]
    async fn start_cooking_needs_a_selection() {
        let mut pantry = pantry_with(vec![
            stored(1, "우유", ymd(2024, 5, 8)),
            stored(2, "계란", ymd(2024, 5, 15)),
        ]);
        pantry.load().await.unwrap();

        assert!(matches!(
            pantry.start_cooking(),
            Err(PantryError::Validation(DomainError::Validation(_)))
        ));

        pantry.toggle_selection(id(2)).unwrap();
        pantry.toggle_selection(id(1)).unwrap();
        assert_eq!(pantry.start_cooking().unwrap(), vec!["우유", "계란"]);

        pantry.leave();
        assert!(pantry.selection().is_empty());
    }

    #[tokio::test]
    async fn create_fills_dates_and_reloads() {
        let mut pantry = pantry_with(vec![]);
        pantry.load().await.unwrap();

        pantry.upsert(Ingredient::draft(" 우유 ")).await.unwrap();

        assert_eq!(pantry.store().fetch_count(), 2);
        let milk = &pantry.items()[0];
        assert_eq!(milk.name, "우유");
        assert_eq!(milk.added_date, Some(today()));
        assert_eq!(milk.expire_date, Some(ymd(2024, 5, 8)));
        assert_eq!(milk.category, "Dairy");

        let sent = pantry.store().snapshot();
        assert_eq!(sent[0].category, "Dairy");
    }

    #[tokio::test]
    async fn update_sends_resolved_category() {
        let mut pantry = pantry_with(vec![stored(1, "계란", ymd(2024, 5, 15))]);
        pantry.load().await.unwrap();

        let mut edited = pantry.get(id(1)).unwrap().clone();
        edited.category = String::new();
        pantry.upsert(edited).await.unwrap();

        let sent = pantry.store().snapshot();
        assert_eq!(sent[0].category, pantry.policy().category_of("계란"));
        assert!(!sent[0].category.is_empty());
    }

    #[tokio::test]
    async fn update_requires_expire_date() {
        let mut pantry = pantry_with(vec![stored(1, "우유", ymd(2024, 5, 8))]);
        pantry.load().await.unwrap();

        let mut edited = pantry.get(id(1)).unwrap().clone();
        edited.expire_date = None;
        let err = pantry.upsert(edited).await.unwrap_err();
        assert!(matches!(err, PantryError::Validation(_)));
        assert_eq!(pantry.store().fetch_count(), 1);

        let mut edited = pantry.get(id(1)).unwrap().clone();
        edited.expire_date = Some(ymd(2024, 6, 1));
        pantry.upsert(edited).await.unwrap();
        assert_eq!(pantry.get(id(1)).unwrap().expire_date, Some(ymd(2024, 6, 1)));
    }

    #[tokio::test]
    async fn failed_upsert_skips_reload() {
        let mut pantry = pantry_with(vec![stored(1, "우유", ymd(2024, 5, 8))]);
        pantry.load().await.unwrap();
        pantry.store().set_offline(true);

        let err = pantry.upsert(Ingredient::draft("계란")).await.unwrap_err();
        assert!(matches!(err, PantryError::Transport(_)));
        assert_eq!(pantry.items().len(), 1);
    }

    #[tokio::test]
    async fn remove_drops_locally_and_from_selection() {
        let mut pantry = pantry_with(vec![
            stored(1, "우유", ymd(2024, 5, 8)),
            stored(2, "계란", ymd(2024, 5, 15)),
        ]);
        pantry.load().await.unwrap();
        pantry.toggle_selection(id(1)).unwrap();

        pantry.remove(id(1)).await.unwrap();

        assert_eq!(pantry.store().fetch_count(), 1);
        assert!(pantry.get(id(1)).is_none());
        assert!(pantry.selection().is_empty());
        assert_eq!(pantry.store().snapshot().len(), 1);
    }

    #[tokio::test]
    async fn failed_remove_keeps_collection_and_selection() {
        let mut pantry = pantry_with(vec![stored(1, "우유", ymd(2024, 5, 8))]);
        pantry.load().await.unwrap();
        pantry.toggle_selection(id(1)).unwrap();
        pantry.store().set_offline(true);

        let err = pantry.remove(id(1)).await.unwrap_err();
        assert!(matches!(err, PantryError::Transport(TransportError::Network(_))));
        assert_eq!(pantry.items().len(), 1);
        assert!(pantry.selection().contains(id(1)));

        pantry.store().set_offline(false);
        assert_eq!(pantry.store().snapshot().len(), 1);
    }

    #[tokio::test]
    async fn expiring_within_window() {
        let mut pantry = pantry_with(vec![
            stored(1, "우유", ymd(2024, 5, 4)),
            stored(2, "계란", ymd(2024, 5, 5)),
            stored(3, "두부", ymd(2024, 4, 30)),
            stored(4, "치즈", ymd(2024, 5, 1)),
        ]);
        pantry.load().await.unwrap();

        let soon: Vec<i64> = pantry
            .expiring_within(today(), EXPIRY_WARNING_DAYS)
            .iter()
            .map(|i| i.id.unwrap().get())
            .collect();
        assert_eq!(soon, vec![4, 1]);
    }
}
