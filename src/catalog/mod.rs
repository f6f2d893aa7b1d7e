//! Product category store and hierarchy resolution.
//!
//! [`CategoryResolver`] joins product ids against a [`CategoryStore`] and walks the configured
//! category columns left to right to build a [`CategoryPath`] per product.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod postgres;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{CatalogError, InvalidDataError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCategoryStore;
pub use model::{CategoryPath, CategoryRow, ProductId};
pub use postgres::{PostgresCategoryStore, PostgresStoreConfig};
pub use resolver::{CategoryResolver, ResolverConfig};
pub use store::CategoryStore;
