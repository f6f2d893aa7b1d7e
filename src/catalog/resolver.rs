use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument, warn};

use crate::constants::{
    DEFAULT_ALLOW_TRAILING_NULLS, DEFAULT_CATEGORY_COLUMNS, DEFAULT_CATEGORY_DEPTH,
};

use super::error::{CatalogError, InvalidDataError};
use super::model::{CategoryPath, CategoryRow, ProductId};
use super::store::CategoryStore;

/// Column layout and null policy for category resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Category columns, root first.
    pub columns: Vec<String>,
    /// Default number of levels to resolve.
    pub depth: usize,
    /// Default null policy for non-root columns.
    pub allow_trailing_nulls: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_CATEGORY_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            depth: DEFAULT_CATEGORY_DEPTH,
            allow_trailing_nulls: DEFAULT_ALLOW_TRAILING_NULLS,
        }
    }
}

impl ResolverConfig {
    pub fn new(columns: Vec<String>) -> Self {
        let depth = columns.len();
        Self {
            columns,
            depth,
            allow_trailing_nulls: DEFAULT_ALLOW_TRAILING_NULLS,
        }
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn allow_trailing_nulls(mut self, allow: bool) -> Self {
        self.allow_trailing_nulls = allow;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.columns.is_empty() {
            return Err(CatalogError::InvalidRequest {
                reason: "at least one category column is required".to_string(),
            });
        }
        if let Some(col) = self.columns.iter().find(|c| c.trim().is_empty()) {
            return Err(CatalogError::InvalidRequest {
                reason: format!("category column name '{}' is blank", col),
            });
        }
        check_depth(self.depth, self.columns.len())
    }
}

fn check_depth(depth: usize, columns: usize) -> Result<(), CatalogError> {
    if depth == 0 || depth > columns {
        return Err(CatalogError::InvalidRequest {
            reason: format!("depth must be between 1 and {}, got {}", columns, depth),
        });
    }
    Ok(())
}

/// Joins product ids against the category store.
pub struct CategoryResolver<S: CategoryStore> {
    store: S,
    config: ResolverConfig,
}

impl<S: CategoryStore> std::fmt::Debug for CategoryResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: CategoryStore> CategoryResolver<S> {
    pub fn new(store: S, config: ResolverConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves with the configured depth and null policy.
    pub async fn resolve_default(
        &self,
        ids: &BTreeSet<ProductId>,
    ) -> Result<HashMap<ProductId, CategoryPath>, CatalogError> {
        self.resolve(ids, self.config.depth, self.config.allow_trailing_nulls)
            .await
    }

    /// Maps each id found in the store to its category path, truncated to `depth` levels.
    ///
    /// Ids absent from the store are absent from the result. A null root category is always
    /// an error; a null deeper column either ends the path (`allow_trailing_nulls`) or is an
    /// error.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn resolve(
        &self,
        ids: &BTreeSet<ProductId>,
        depth: usize,
        allow_trailing_nulls: bool,
    ) -> Result<HashMap<ProductId, CategoryPath>, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::InvalidRequest {
                reason: "at least one product id is required".to_string(),
            });
        }
        check_depth(depth, self.config.columns.len())?;

        let columns = &self.config.columns[..depth];
        let id_list: Vec<ProductId> = ids.iter().cloned().collect();
        let rows = self.store.query(&id_list, columns).await?;

        debug!(rows = rows.len(), "Category rows fetched");

        let mut categories = HashMap::with_capacity(rows.len());
        for row in rows {
            if !ids.contains(&row.id) {
                warn!(product_id = %row.id, "Store returned a row for an id that was not requested");
                continue;
            }
            if categories.contains_key(&row.id) {
                warn!(product_id = %row.id, "Duplicate category row, keeping the first");
                continue;
            }
            let path = build_path(&row, columns, allow_trailing_nulls)?;
            categories.insert(row.id, path);
        }

        Ok(categories)
    }
}

fn build_path(
    row: &CategoryRow,
    columns: &[String],
    allow_trailing_nulls: bool,
) -> Result<CategoryPath, InvalidDataError> {
    let mut path = CategoryPath::default();
    for (idx, column) in columns.iter().enumerate() {
        match row.value(idx) {
            Some(value) => path.push(value.to_string()),
            None if idx == 0 => {
                return Err(InvalidDataError::RootCategoryNull {
                    product_id: row.id.clone(),
                    column: column.clone(),
                });
            }
            None if allow_trailing_nulls => break,
            None => {
                return Err(InvalidDataError::NullCategory {
                    product_id: row.id.clone(),
                    column: column.clone(),
                });
            }
        }
    }
    Ok(path)
}
