use thiserror::Error;

use crate::storage::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Outcomes a catalog caller has to tell apart.
///
/// Invalid sort/paging input is never an error; it is normalized before the
/// query runs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn book_not_found(id: i32) -> Self {
        CatalogError::NotFound { entity: "book", id }
    }

    pub fn category_not_found(id: i32) -> Self {
        CatalogError::NotFound {
            entity: "category",
            id,
        }
    }

    /// Connectivity and time-budget failures; the same call may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Store(e) if e.is_transient())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
