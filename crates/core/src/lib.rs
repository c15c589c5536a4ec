//! `fridgechef-core`: shared building blocks.
//!
//! This crate contains identifiers, the error model, calendar-date handling and
//! the explicit session context. It performs no IO.

pub mod date;
pub mod error;
pub mod id;
pub mod session;

pub use date::{format_calendar_date, parse_calendar_date};
pub use error::{DomainError, DomainResult, TransportError};
pub use id::{IngredientId, RecipeId, SessionId};
pub use session::SessionContext;
