//! Catalog categorizer library crate (used by the server and integration tests).
//!
//! Suggests a product's category path from a free-text description and an optional image:
//! embed the inputs, find the nearest catalog products, look up their category hierarchy and
//! let an LLM re-rank the resulting paths.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`CategoryPipeline`] - retrieve then rank
//! - [`CandidateRetriever`], [`Candidate`] - embedding search and category resolution
//! - [`CategoryRanker`], [`RankerConfig`] - LLM re-ranking with fallback
//!
//! ## Backends
//! - [`CategoryStore`], [`PostgresCategoryStore`], [`CategoryResolver`] - category hierarchy
//! - [`Embedder`], [`HttpEmbedder`], [`StubEmbedder`] - embeddings
//! - [`NeighborIndex`], [`QdrantNeighborIndex`] - nearest-neighbor search
//! - [`TextGenerator`], [`GenaiGenerator`] - LLM calls
//!
//! ## Configuration & Errors
//! - [`Config`], [`ConfigError`] - `CATEGORIZER_*` environment configuration
//! - [`CategorizeError`] - everything retrieval can fail with
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod pipeline;
pub mod ranking;
pub mod retrieval;
pub mod vectordb;

pub use catalog::{
    CatalogError, CategoryPath, CategoryResolver, CategoryRow, CategoryStore, InvalidDataError,
    PostgresCategoryStore, PostgresStoreConfig, ProductId, ResolverConfig,
};
#[cfg(any(test, feature = "mock"))]
pub use catalog::MockCategoryStore;

pub use config::{Config, ConfigError};
pub use constants::{CATEGORY_DELIMITER, NEIGHBOR_ID_SUFFIX_LEN, strip_neighbor_suffix};
pub use embedding::{
    Embedder, EmbeddingError, HttpEmbedder, HttpEmbedderConfig, ImageRef, MultimodalEmbedding,
    StubEmbedder,
};
pub use error::{CategorizeError, CategorizeResult};

pub use llm::{GenaiGenerator, GenerationOptions, LlmError, TextGenerator};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockTextGenerator;

pub use pipeline::CategoryPipeline;
pub use ranking::{CategoryRanker, RankError, RankerConfig};
pub use retrieval::{Candidate, CandidateRetriever, RetrieverConfig};

#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockNeighborIndex;
pub use vectordb::{
    NeighborIndex, NeighborResult, QdrantNeighborConfig, QdrantNeighborIndex, VectorDbError,
};
