//! Shelf-life policy engine.
//!
//! Pure date arithmetic and table lookups (no IO, no clock). Callers decide
//! what "today" is.

pub mod expiration;
pub mod reference;

pub use expiration::{
    DEFAULT_SHELF_LIFE_DAYS, EXPIRY_WARNING_DAYS, FROZEN_SHELF_LIFE_MONTHS, ShelfLifePolicy,
};
pub use reference::{CategoryEntry, CategoryIndex, OTHER_CATEGORY, ReferenceData};
