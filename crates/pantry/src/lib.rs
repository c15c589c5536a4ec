//! Ingredient state manager.
//!
//! Owns the session's ingredient collection (a read-through cache of the
//! persistence collaborator), the derived category grouping, the bounded
//! recipe selection and the per-ingredient edit flow.

pub mod editor;
pub mod error;
pub mod grouping;
pub mod ingredient;
pub mod pantry;
pub mod selection;
pub mod store;

pub use editor::{EditOutcome, EditSession, IngredientEditor};
pub use error::{PantryError, PantryResult};
pub use grouping::{CategoryGroup, group_by_category};
pub use ingredient::Ingredient;
pub use pantry::Pantry;
pub use selection::{CAPACITY_WARNING, MAX_SELECTION, Selection, SelectionChange};
pub use store::{InMemoryIngredientStore, IngredientStore};
