use std::sync::Arc;

use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

use super::error::CatalogError;
use super::model::{CategoryRow, ProductId};
use super::store::CategoryStore;

/// Table layout of the product reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresStoreConfig {
    pub table: String,
    pub id_column: String,
}

impl Default for PostgresStoreConfig {
    fn default() -> Self {
        Self {
            table: "products".to_string(),
            id_column: "id".to_string(),
        }
    }
}

/// Category store backed by a Postgres product reference table.
#[derive(Clone)]
pub struct PostgresCategoryStore {
    client: Arc<Client>,
    config: PostgresStoreConfig,
}

impl std::fmt::Debug for PostgresCategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCategoryStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PostgresCategoryStore {
    /// Connects to `database_url` and drives the connection on a background task.
    pub async fn connect(
        database_url: &str,
        config: PostgresStoreConfig,
    ) -> Result<Self, CatalogError> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .map_err(|e| CatalogError::ConnectionFailed {
                message: e.to_string(),
            })?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "Category store connection closed with error");
            }
        });

        info!(table = %config.table, "Connected to category store");

        Ok(Self::from_client(client, config))
    }

    pub fn from_client(client: Client, config: PostgresStoreConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    pub fn config(&self) -> &PostgresStoreConfig {
        &self.config
    }

    fn query_failed(&self, message: impl ToString) -> CatalogError {
        CatalogError::QueryFailed {
            table: self.config.table.clone(),
            message: message.to_string(),
        }
    }

    fn row_to_category_row(&self, row: &Row, columns: usize) -> Result<CategoryRow, CatalogError> {
        let id: String = row.try_get(0).map_err(|e| self.query_failed(e))?;
        let values = (1..=columns)
            .map(|idx| row.try_get::<_, Option<String>>(idx))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.query_failed(e))?;
        Ok(CategoryRow::new(id, values))
    }
}

/// Builds the batched lookup statement. Identifiers are quoted; ids are bound as `$1`.
pub fn build_category_query(config: &PostgresStoreConfig, columns: &[String]) -> String {
    let selected: Vec<String> = std::iter::once(config.id_column.as_str())
        .chain(columns.iter().map(String::as_str))
        .map(quote_ident)
        .collect();

    format!(
        "SELECT {} FROM {} WHERE {} = ANY($1)",
        selected.join(", "),
        quote_table(&config.table),
        quote_ident(&config.id_column)
    )
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `schema.table` is quoted per segment.
fn quote_table(table: &str) -> String {
    table.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}

impl CategoryStore for PostgresCategoryStore {
    async fn query(
        &self,
        ids: &[ProductId],
        columns: &[String],
    ) -> Result<Vec<CategoryRow>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = build_category_query(&self.config, columns);
        debug!(ids = ids.len(), columns = columns.len(), "Querying category store");

        let rows = self
            .client
            .query(sql.as_str(), &[&ids])
            .await
            .map_err(|e| self.query_failed(e))?;

        rows.iter()
            .map(|row| self.row_to_category_row(row, columns.len()))
            .collect()
    }
}
