//! In-memory category store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::CatalogError;
use super::model::{CategoryRow, ProductId};
use super::store::CategoryStore;

/// Category store holding rows keyed by column name.
#[derive(Default, Clone)]
pub struct MockCategoryStore {
    rows: Arc<RwLock<Vec<(ProductId, HashMap<String, Option<String>>)>>>,
    queries: Arc<RwLock<Vec<Vec<ProductId>>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

impl MockCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product whose categories fill `columns` left to right.
    pub fn insert(&self, id: &str, columns: &[&str], values: &[Option<&str>]) {
        let row = columns
            .iter()
            .zip(values.iter())
            .map(|(c, v)| (c.to_string(), v.map(str::to_string)))
            .collect();
        self.rows.write().push((id.to_string(), row));
    }

    /// Makes every subsequent query fail with `message`.
    pub fn fail_queries(&self, message: &str) {
        *self.fail_with.write() = Some(message.to_string());
    }

    /// Id lists received by [`CategoryStore::query`], one entry per call.
    pub fn queries(&self) -> Vec<Vec<ProductId>> {
        self.queries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl CategoryStore for MockCategoryStore {
    async fn query(
        &self,
        ids: &[ProductId],
        columns: &[String],
    ) -> Result<Vec<CategoryRow>, CatalogError> {
        self.queries.write().push(ids.to_vec());

        if let Some(message) = self.fail_with.read().clone() {
            return Err(CatalogError::QueryFailed {
                table: "mock".to_string(),
                message,
            });
        }

        let rows = self
            .rows
            .read()
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, values)| {
                let values = columns
                    .iter()
                    .map(|c| values.get(c).cloned().flatten())
                    .collect();
                CategoryRow::new(id.clone(), values)
            })
            .collect();

        Ok(rows)
    }
}
