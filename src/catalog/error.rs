use thiserror::Error;

use super::model::ProductId;

/// Category data that violates the hierarchy invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDataError {
    /// The first category column was empty; every product needs a root category.
    #[error("top level category '{column}' for product '{product_id}' is null")]
    RootCategoryNull { product_id: ProductId, column: String },

    /// A non-root column was empty while trailing nulls are disallowed.
    #[error("column '{column}' for product '{product_id}' is null and trailing nulls are not allowed")]
    NullCategory { product_id: ProductId, column: String },
}

impl InvalidDataError {
    pub fn product_id(&self) -> &str {
        match self {
            Self::RootCategoryNull { product_id, .. } | Self::NullCategory { product_id, .. } => {
                product_id
            }
        }
    }
}

#[derive(Debug, Error)]
/// Errors returned by category store access and resolution.
pub enum CatalogError {
    /// Stored category data is unusable.
    #[error("invalid category data: {0}")]
    InvalidData(#[from] InvalidDataError),

    /// Could not connect to the category store.
    #[error("failed to connect to category store: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
    },

    /// The batched lookup failed.
    #[error("category query against '{table}' failed: {message}")]
    QueryFailed {
        /// Table name.
        table: String,
        /// Error message.
        message: String,
    },

    /// Caller passed arguments outside the resolver contract.
    #[error("invalid resolve request: {reason}")]
    InvalidRequest {
        /// Error message.
        reason: String,
    },
}
