use thiserror::Error;

use fridgechef_core::{DomainError, TransportError};

pub type PantryResult<T> = Result<T, PantryError>;

/// Failure of a pantry operation.
///
/// Either way the in-memory collection is left at its last confirmed value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PantryError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("ingredient storage failed: {0}")]
    Transport(#[from] TransportError),
}
