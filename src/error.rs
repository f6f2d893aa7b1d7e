//! Errors surfaced by retrieval and the retrieve-and-rank pipeline.
//!
//! Ranking problems are not represented here: the ranker recovers from them itself.

use thiserror::Error;

use crate::catalog::{CatalogError, InvalidDataError};
use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
pub enum CategorizeError {
    /// Caller arguments outside the contract (blank description, zero neighbors).
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Embedding computation failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Neighbor service unreachable or returned malformed data.
    #[error("neighbor retrieval failed: {0}")]
    Retrieval(#[from] VectorDbError),

    /// Category data violates the hierarchy invariants.
    #[error("invalid category data: {0}")]
    InvalidData(#[from] InvalidDataError),

    /// Category store unreachable or query failed.
    #[error("category store failed: {0}")]
    CategoryStore(CatalogError),
}

impl From<CatalogError> for CategorizeError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidData(e) => CategorizeError::InvalidData(e),
            other => CategorizeError::CategoryStore(other),
        }
    }
}

/// Convenience result type for retrieval and pipeline operations.
pub type CategorizeResult<T> = Result<T, CategorizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_invalid_data_is_lifted() {
        let err: CategorizeError = CatalogError::InvalidData(InvalidDataError::RootCategoryNull {
            product_id: "P1".to_string(),
            column: "c0_name".to_string(),
        })
        .into();

        assert!(matches!(err, CategorizeError::InvalidData(_)));
        assert!(err.to_string().contains("P1"));
    }

    #[test]
    fn test_catalog_query_failure_stays_store_error() {
        let err: CategorizeError = CatalogError::QueryFailed {
            table: "products".to_string(),
            message: "timeout".to_string(),
        }
        .into();

        assert!(matches!(err, CategorizeError::CategoryStore(_)));
    }
}
