use std::collections::HashMap;

use chrono::{Days, Months, NaiveDate};

use fridgechef_core::{DomainResult, parse_calendar_date};

use crate::reference::{CategoryIndex, ReferenceData};

/// Days to expiry for names missing from the shelf-life table.
pub const DEFAULT_SHELF_LIFE_DAYS: u32 = 30;

/// Frozen items keep for this many calendar months.
pub const FROZEN_SHELF_LIFE_MONTHS: u32 = 3;

/// Window (in days) inside which an item counts as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 3;

/// Expiration policy built from the reference tables.
///
/// Every method is a pure function of its arguments and the tables captured at
/// construction time.
#[derive(Debug, Clone)]
pub struct ShelfLifePolicy {
    days: HashMap<String, u32>,
    categories: CategoryIndex,
}

impl ShelfLifePolicy {
    pub fn new(data: &ReferenceData) -> Self {
        Self {
            days: data
                .shelf_life
                .iter()
                .map(|(name, days)| (name.clone(), *days))
                .collect(),
            categories: data.category_index(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(&ReferenceData::builtin())
    }

    /// Days-to-expiry from the table, or [`DEFAULT_SHELF_LIFE_DAYS`].
    pub fn lookup_days(&self, name: &str) -> u32 {
        self.days.get(name).copied().unwrap_or(DEFAULT_SHELF_LIFE_DAYS)
    }

    pub fn category_of(&self, name: &str) -> &str {
        self.categories.category_of(name)
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Expire date for an item added on `added`.
    ///
    /// Frozen: three calendar months later, clipped to the end of the target
    /// month (Jan 31 → Apr 30). Otherwise: `lookup_days(name)` days later.
    pub fn compute_expiration(&self, added: NaiveDate, name: &str, frozen: bool) -> NaiveDate {
        let computed = if frozen {
            added.checked_add_months(Months::new(FROZEN_SHELF_LIFE_MONTHS))
        } else {
            added.checked_add_days(Days::new(u64::from(self.lookup_days(name))))
        };
        // Only reachable near NaiveDate::MAX.
        computed.unwrap_or(NaiveDate::MAX)
    }

    /// [`Self::compute_expiration`] for a user-entered date string.
    pub fn compute_expiration_str(&self, added: &str, name: &str, frozen: bool) -> DomainResult<NaiveDate> {
        let added = parse_calendar_date(added)?;
        Ok(self.compute_expiration(added, name, frozen))
    }

    /// Whole days from `today` to `expire` (negative once expired).
    pub fn days_until_expiry(expire: NaiveDate, today: NaiveDate) -> i64 {
        expire.signed_duration_since(today).num_days()
    }

    /// Expired once `today` is past `expire`; the expire date itself still counts.
    pub fn is_expired(expire: NaiveDate, today: NaiveDate) -> bool {
        today > expire
    }

    pub fn is_expiring_soon(expire: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
        let left = Self::days_until_expiry(expire, today);
        (0..=window_days).contains(&left)
    }
}

impl Default for ShelfLifePolicy {
    fn default() -> Self {
        Self::builtin()
    }
}
