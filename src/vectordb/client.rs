use futures_util::future::join_all;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::SearchPointsBuilder;
use tracing::debug;

use super::error::VectorDbError;
use super::model::NeighborResult;
use super::{DEFAULT_COLLECTION_NAME, DEFAULT_ID_FIELD};

/// Minimal async interface over the nearest-neighbor service.
pub trait NeighborIndex: Send + Sync {
    /// Returns up to `k` matches for each query vector, one list per vector in input order.
    fn nearest_neighbors(
        &self,
        vectors: &[Vec<f32>],
        k: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Vec<NeighborResult>>, VectorDbError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QdrantNeighborConfig {
    pub collection: String,
    pub id_field: String,
}

impl Default for QdrantNeighborConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

impl QdrantNeighborConfig {
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }
}

#[derive(Clone)]
/// Neighbor index backed by a Qdrant collection with cosine distance.
pub struct QdrantNeighborIndex {
    client: Qdrant,
    url: String,
    config: QdrantNeighborConfig,
}

impl std::fmt::Debug for QdrantNeighborIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantNeighborIndex")
            .field("url", &self.url)
            .field("config", &self.config)
            .finish()
    }
}

impl QdrantNeighborIndex {
    /// Creates a client for `url`.
    pub fn new(url: &str, config: QdrantNeighborConfig) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            config,
        })
    }

    /// Returns the underlying Qdrant client.
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &QdrantNeighborConfig {
        &self.config
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Fails with [`VectorDbError::CollectionNotFound`] if the index collection is missing.
    pub async fn ensure_collection_exists(&self) -> Result<(), VectorDbError> {
        let exists = self
            .client
            .collection_exists(&self.config.collection)
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            return Err(VectorDbError::CollectionNotFound {
                collection: self.config.collection.clone(),
            });
        }
        Ok(())
    }

    async fn search_one(&self, vector: Vec<f32>, k: u64) -> Result<Vec<NeighborResult>, VectorDbError> {
        let collection = &self.config.collection;
        let request = SearchPointsBuilder::new(collection.as_str(), vector, k).with_payload(true);

        let response = self.client.search_points(request).await.map_err(|e| {
            VectorDbError::SearchFailed {
                collection: collection.clone(),
                message: e.to_string(),
            }
        })?;

        response
            .result
            .iter()
            .map(|point| NeighborResult::from_scored_point(point, &self.config.id_field, collection))
            .collect()
    }
}

impl NeighborIndex for QdrantNeighborIndex {
    async fn nearest_neighbors(
        &self,
        vectors: &[Vec<f32>],
        k: u64,
    ) -> Result<Vec<Vec<NeighborResult>>, VectorDbError> {
        if let Some(index) = vectors.iter().position(Vec::is_empty) {
            return Err(VectorDbError::EmptyVector { index });
        }

        let searches = vectors.iter().map(|v| self.search_one(v.clone(), k));
        let results = join_all(searches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            collection = %self.config.collection,
            queries = vectors.len(),
            matches = results.iter().map(Vec::len).sum::<usize>(),
            "Neighbor search complete"
        );

        Ok(results)
    }
}
