use super::error::CatalogError;
use super::model::{CategoryRow, ProductId};

/// Minimal async interface over the relational product-category store.
pub trait CategoryStore: Send + Sync {
    /// Fetches `columns` for every id in `ids` in a single batched lookup.
    ///
    /// Each returned row carries one value per requested column, in the same order.
    /// Ids missing from the store produce no row.
    fn query(
        &self,
        ids: &[ProductId],
        columns: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<CategoryRow>, CatalogError>> + Send;
}
