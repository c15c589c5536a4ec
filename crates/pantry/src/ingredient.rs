use chrono::NaiveDate;

use fridgechef_core::IngredientId;
use fridgechef_policy::ShelfLifePolicy;

/// An ingredient in the fridge.
///
/// `category` is derived from the category table when the collection is
/// loaded; it is never read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Absent until the ingredient has been stored.
    pub id: Option<IngredientId>,
    pub name: String,
    pub category: String,
    pub added_date: Option<NaiveDate>,
    pub expire_date: Option<NaiveDate>,
    pub is_frozen: bool,
    /// Display attribute supplied by storage.
    pub image_url: Option<String>,
}

impl Ingredient {
    /// A not-yet-stored ingredient with no dates chosen.
    pub fn draft(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: String::new(),
            added_date: None,
            expire_date: None,
            is_frozen: false,
            image_url: None,
        }
    }

    pub fn with_id(mut self, id: IngredientId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_dates(mut self, added: NaiveDate, expire: NaiveDate) -> Self {
        self.added_date = Some(added);
        self.expire_date = Some(expire);
        self
    }

    pub fn frozen(mut self, frozen: bool) -> Self {
        self.is_frozen = frozen;
        self
    }

    pub fn is_stored(&self) -> bool {
        self.id.is_some()
    }

    /// Days left before expiry, if an expire date is known.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expire_date
            .map(|expire| ShelfLifePolicy::days_until_expiry(expire, today))
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expire_date
            .is_some_and(|expire| ShelfLifePolicy::is_expired(expire, today))
    }
}
