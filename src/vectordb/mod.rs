//! Nearest-neighbor index access (Qdrant).

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

#[cfg(test)]
mod tests;

pub use client::{NeighborIndex, QdrantNeighborIndex, QdrantNeighborConfig};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockNeighborIndex;
pub use model::{NeighborResult, score_to_distance};

pub const DEFAULT_COLLECTION_NAME: &str = "product_embeddings";

/// Payload field holding the neighbor identifier (`ProductId` + suffix).
pub const DEFAULT_ID_FIELD: &str = "identifier";
