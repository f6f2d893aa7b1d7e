//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `CATEGORIZER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::catalog::{PostgresStoreConfig, ResolverConfig};
use crate::constants::{
    DEFAULT_ALLOW_TRAILING_NULLS, DEFAULT_CATEGORY_COLUMNS, DEFAULT_CATEGORY_DEPTH,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_NUM_NEIGHBORS,
};
use crate::embedding::HttpEmbedderConfig;
use crate::ranking::RankerConfig;
use crate::retrieval::RetrieverConfig;
use crate::vectordb::{DEFAULT_COLLECTION_NAME, DEFAULT_ID_FIELD, QdrantNeighborConfig};

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CATEGORIZER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding product embeddings.
    pub neighbor_collection: String,

    /// Payload field carrying the suffixed neighbor identifier.
    pub neighbor_id_field: String,

    /// Postgres connection string for the category store.
    pub database_url: String,

    pub category_table: String,

    pub id_column: String,

    /// Category columns, root first.
    pub category_columns: Vec<String>,

    /// Levels resolved per product. Default: `4`.
    pub category_depth: usize,

    /// Whether a null below the root ends a path instead of failing.
    pub allow_trailing_nulls: bool,

    /// Matches requested per embedding. Default: `5`.
    pub num_neighbors: u64,

    /// Multimodal embedding endpoint. When unset the stub embedder is used.
    pub embedding_endpoint: Option<String>,

    pub embedding_api_key: Option<String>,

    /// Model name handed to the LLM client.
    pub llm_model: String,

    /// Output token budget for the ranking call. Default: `256`.
    pub max_output_tokens: u32,
}

/// Default Qdrant URL used when `CATEGORIZER_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default Postgres URL used when `CATEGORIZER_DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/catalog";

/// Default ranking model.
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

impl Default for Config {
    fn default() -> Self {
        let store = PostgresStoreConfig::default();
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            neighbor_collection: DEFAULT_COLLECTION_NAME.to_string(),
            neighbor_id_field: DEFAULT_ID_FIELD.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            category_table: store.table,
            id_column: store.id_column,
            category_columns: DEFAULT_CATEGORY_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            category_depth: DEFAULT_CATEGORY_DEPTH,
            allow_trailing_nulls: DEFAULT_ALLOW_TRAILING_NULLS,
            num_neighbors: DEFAULT_NUM_NEIGHBORS,
            embedding_endpoint: None,
            embedding_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CATEGORIZER_PORT";
    const ENV_BIND_ADDR: &'static str = "CATEGORIZER_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "CATEGORIZER_QDRANT_URL";
    const ENV_NEIGHBOR_COLLECTION: &'static str = "CATEGORIZER_NEIGHBOR_COLLECTION";
    const ENV_NEIGHBOR_ID_FIELD: &'static str = "CATEGORIZER_NEIGHBOR_ID_FIELD";
    const ENV_DATABASE_URL: &'static str = "CATEGORIZER_DATABASE_URL";
    const ENV_CATEGORY_TABLE: &'static str = "CATEGORIZER_CATEGORY_TABLE";
    const ENV_ID_COLUMN: &'static str = "CATEGORIZER_ID_COLUMN";
    const ENV_CATEGORY_COLUMNS: &'static str = "CATEGORIZER_CATEGORY_COLUMNS";
    const ENV_CATEGORY_DEPTH: &'static str = "CATEGORIZER_CATEGORY_DEPTH";
    const ENV_ALLOW_TRAILING_NULLS: &'static str = "CATEGORIZER_ALLOW_TRAILING_NULLS";
    const ENV_NUM_NEIGHBORS: &'static str = "CATEGORIZER_NUM_NEIGHBORS";
    const ENV_EMBEDDING_ENDPOINT: &'static str = "CATEGORIZER_EMBEDDING_ENDPOINT";
    const ENV_EMBEDDING_API_KEY: &'static str = "CATEGORIZER_EMBEDDING_API_KEY";
    const ENV_LLM_MODEL: &'static str = "CATEGORIZER_LLM_MODEL";
    const ENV_MAX_OUTPUT_TOKENS: &'static str = "CATEGORIZER_MAX_OUTPUT_TOKENS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let neighbor_collection = Self::parse_string_from_env(
            Self::ENV_NEIGHBOR_COLLECTION,
            defaults.neighbor_collection,
        );
        let neighbor_id_field =
            Self::parse_string_from_env(Self::ENV_NEIGHBOR_ID_FIELD, defaults.neighbor_id_field);
        let database_url =
            Self::parse_string_from_env(Self::ENV_DATABASE_URL, defaults.database_url);
        let category_table =
            Self::parse_string_from_env(Self::ENV_CATEGORY_TABLE, defaults.category_table);
        let id_column = Self::parse_string_from_env(Self::ENV_ID_COLUMN, defaults.id_column);
        let category_columns =
            Self::parse_list_from_env(Self::ENV_CATEGORY_COLUMNS, defaults.category_columns);
        let category_depth =
            Self::parse_number_from_env(Self::ENV_CATEGORY_DEPTH, defaults.category_depth)?;
        let allow_trailing_nulls = Self::parse_bool_from_env(
            Self::ENV_ALLOW_TRAILING_NULLS,
            defaults.allow_trailing_nulls,
        )?;
        let num_neighbors =
            Self::parse_number_from_env(Self::ENV_NUM_NEIGHBORS, defaults.num_neighbors)?;
        let embedding_endpoint = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_ENDPOINT);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let max_output_tokens =
            Self::parse_number_from_env(Self::ENV_MAX_OUTPUT_TOKENS, defaults.max_output_tokens)?;

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            neighbor_collection,
            neighbor_id_field,
            database_url,
            category_table,
            id_column,
            category_columns,
            category_depth,
            allow_trailing_nulls,
            num_neighbors,
            embedding_endpoint,
            embedding_api_key,
            llm_model,
            max_output_tokens,
        })
    }

    /// Checks cross-field invariants. Does not contact any backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (Self::ENV_QDRANT_URL, &self.qdrant_url),
            (Self::ENV_NEIGHBOR_COLLECTION, &self.neighbor_collection),
            (Self::ENV_NEIGHBOR_ID_FIELD, &self.neighbor_id_field),
            (Self::ENV_DATABASE_URL, &self.database_url),
            (Self::ENV_CATEGORY_TABLE, &self.category_table),
            (Self::ENV_ID_COLUMN, &self.id_column),
            (Self::ENV_LLM_MODEL, &self.llm_model),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ConfigError::EmptyValue { name });
        }

        if self.category_columns.is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_CATEGORY_COLUMNS,
            });
        }

        if self.category_depth == 0 || self.category_depth > self.category_columns.len() {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.category_depth,
                columns: self.category_columns.len(),
            });
        }

        if self.num_neighbors == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_NUM_NEIGHBORS,
            });
        }

        if self.max_output_tokens == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_MAX_OUTPUT_TOKENS,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.category_columns.clone())
            .depth(self.category_depth)
            .allow_trailing_nulls(self.allow_trailing_nulls)
    }

    pub fn store_config(&self) -> PostgresStoreConfig {
        PostgresStoreConfig {
            table: self.category_table.clone(),
            id_column: self.id_column.clone(),
        }
    }

    pub fn neighbor_config(&self) -> QdrantNeighborConfig {
        QdrantNeighborConfig::default()
            .collection(&self.neighbor_collection)
            .id_field(&self.neighbor_id_field)
    }

    pub fn retriever_config(&self) -> RetrieverConfig {
        RetrieverConfig::default().num_neighbors(self.num_neighbors)
    }

    pub fn ranker_config(&self) -> RankerConfig {
        RankerConfig::default().max_output_tokens(self.max_output_tokens)
    }

    /// `None` when no embedding endpoint is configured.
    pub fn embedder_config(&self) -> Option<HttpEmbedderConfig> {
        let endpoint = self.embedding_endpoint.as_ref()?;
        let config = HttpEmbedderConfig::new(endpoint);
        Some(match &self.embedding_api_key {
            Some(key) => config.api_key(key),
            None => config,
        })
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default,
        }
    }

    fn parse_number_from_env<T: std::str::FromStr>(
        var_name: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
