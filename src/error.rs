//! Error types for the catalog.

use thiserror::Error;

/// Main error type for catalog operations.
///
/// The query and mutation operations on [`Catalog`](crate::Catalog) are total;
/// these variants only come out of input collection, the opt-in uniqueness
/// guard and JSON export.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Title already exists: {0}")]
    DuplicateTitle(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
