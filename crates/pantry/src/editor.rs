//! Per-ingredient edit flow.
//!
//! `Idle -> Editing -> Saved | Deleted | Cancelled -> Idle`. The editor holds
//! the pending, unsaved values; nothing reaches the pantry until `save` or
//! `delete` succeeds. A failed save/delete keeps the editor in `Editing`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use fridgechef_core::{DomainError, parse_calendar_date};
use fridgechef_policy::ShelfLifePolicy;

use crate::error::PantryResult;
use crate::ingredient::Ingredient;
use crate::pantry::Pantry;
use crate::store::IngredientStore;

/// How an edit ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    Deleted,
    Cancelled,
}

/// Pending values of an open edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    ingredient: Ingredient,
    added_date: NaiveDate,
    expire_date: NaiveDate,
    is_frozen: bool,
    manual_expire: bool,
}

impl EditSession {
    /// The ingredient as it was when the edit was opened.
    pub fn original(&self) -> &Ingredient {
        &self.ingredient
    }

    pub fn added_date(&self) -> NaiveDate {
        self.added_date
    }

    pub fn expire_date(&self) -> NaiveDate {
        self.expire_date
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    /// True while the expire date is a user entry rather than a computed one.
    pub fn has_manual_expire(&self) -> bool {
        self.manual_expire
    }

    fn recompute(&mut self, policy: &ShelfLifePolicy) {
        self.expire_date = policy.compute_expiration(self.added_date, &self.ingredient.name, self.is_frozen);
        self.manual_expire = false;
    }

    fn to_ingredient(&self) -> Ingredient {
        Ingredient {
            added_date: Some(self.added_date),
            expire_date: Some(self.expire_date),
            is_frozen: self.is_frozen,
            ..self.ingredient.clone()
        }
    }
}

/// Edit state machine for one ingredient at a time.
#[derive(Debug, Clone)]
pub struct IngredientEditor {
    policy: Arc<ShelfLifePolicy>,
    today: NaiveDate,
    /// `None` while idle.
    editing: Option<EditSession>,
}

impl IngredientEditor {
    pub fn new(policy: Arc<ShelfLifePolicy>, today: NaiveDate) -> Self {
        Self {
            policy,
            today,
            editing: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Start editing `ingredient`, replacing any open edit.
    ///
    /// Persisted dates are used as-is. A missing added date defaults to today
    /// and a missing expire date is computed for the current frozen flag.
    pub fn open(&mut self, ingredient: &Ingredient) -> &EditSession {
        let added_date = ingredient.added_date.unwrap_or(self.today);
        let expire_date = ingredient.expire_date.unwrap_or_else(|| {
            self.policy
                .compute_expiration(added_date, &ingredient.name, ingredient.is_frozen)
        });
        debug!(ingredient_id = ?ingredient.id, name = %ingredient.name, "edit opened");
        self.editing.insert(EditSession {
            ingredient: ingredient.clone(),
            added_date,
            expire_date,
            is_frozen: ingredient.is_frozen,
            manual_expire: false,
        })
    }

    /// New added date; the expire date is recomputed for the current frozen flag.
    pub fn set_added_date(&mut self, added: NaiveDate) -> PantryResult<NaiveDate> {
        let policy = Arc::clone(&self.policy);
        let session = self.editing_mut()?;
        session.added_date = added;
        session.recompute(&policy);
        Ok(session.expire_date)
    }

    /// [`Self::set_added_date`] for a user-entered string.
    pub fn set_added_date_str(&mut self, added: &str) -> PantryResult<NaiveDate> {
        self.editing_mut()?;
        let added = parse_calendar_date(added)?;
        self.set_added_date(added)
    }

    /// Manual expire date; kept until the next recompute.
    pub fn set_expire_date(&mut self, expire: NaiveDate) -> PantryResult<()> {
        let session = self.editing_mut()?;
        session.expire_date = expire;
        session.manual_expire = true;
        Ok(())
    }

    /// Flip frozen and recompute the expire date, discarding any manual entry.
    pub fn toggle_frozen(&mut self) -> PantryResult<NaiveDate> {
        let policy = Arc::clone(&self.policy);
        let session = self.editing_mut()?;
        session.is_frozen = !session.is_frozen;
        session.recompute(&policy);
        Ok(session.expire_date)
    }

    /// Drop pending values.
    pub fn cancel(&mut self) -> EditOutcome {
        self.editing = None;
        EditOutcome::Cancelled
    }

    /// Persist the pending values through the pantry (which reloads).
    pub async fn save<S>(&mut self, pantry: &mut Pantry<S>) -> PantryResult<EditOutcome>
    where
        S: IngredientStore,
    {
        let record = self.editing_mut()?.to_ingredient();
        pantry.upsert(record).await?;
        self.editing = None;
        Ok(EditOutcome::Saved)
    }

    /// Delete the edited ingredient. Only stored ingredients can be deleted.
    pub async fn delete<S>(&mut self, pantry: &mut Pantry<S>) -> PantryResult<EditOutcome>
    where
        S: IngredientStore,
    {
        let id = self
            .editing_mut()?
            .ingredient
            .id
            .ok_or_else(|| DomainError::validation("ingredient has not been stored yet"))?;
        pantry.remove(id).await?;
        self.editing = None;
        Ok(EditOutcome::Deleted)
    }

    fn editing_mut(&mut self) -> PantryResult<&mut EditSession> {
        self.editing
            .as_mut()
            .ok_or_else(|| DomainError::invariant("no ingredient is being edited").into())
    }
}
