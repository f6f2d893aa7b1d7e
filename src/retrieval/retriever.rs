use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

use crate::catalog::{CategoryResolver, CategoryStore};
use crate::embedding::{Embedder, ImageRef};
use crate::error::{CategorizeError, CategorizeResult};
use crate::vectordb::{NeighborIndex, NeighborResult};

use super::config::RetrieverConfig;
use super::model::Candidate;

/// Turns a description (and optional image) into distance-ordered category candidates.
pub struct CandidateRetriever<E: Embedder, N: NeighborIndex, S: CategoryStore> {
    embedder: E,
    index: N,
    resolver: CategoryResolver<S>,
    config: RetrieverConfig,
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> std::fmt::Debug
    for CandidateRetriever<E, N, S>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateRetriever")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> CandidateRetriever<E, N, S> {
    pub fn new(
        embedder: E,
        index: N,
        resolver: CategoryResolver<S>,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn index(&self) -> &N {
        &self.index
    }

    pub fn resolver(&self) -> &CategoryResolver<S> {
        &self.resolver
    }

    /// Embeds the inputs, queries `num_neighbors` matches per embedding, resolves categories
    /// and returns one candidate per match, sorted by ascending distance (stable on ties).
    #[instrument(skip(self, description, image), fields(desc_len = description.len(), with_image = image.is_some()))]
    pub async fn retrieve(
        &self,
        description: &str,
        image: Option<&ImageRef>,
        num_neighbors: u64,
    ) -> CategorizeResult<Vec<Candidate>> {
        if description.trim().is_empty() {
            return Err(CategorizeError::InvalidRequest {
                reason: "description cannot be empty".to_string(),
            });
        }
        if num_neighbors == 0 {
            return Err(CategorizeError::InvalidRequest {
                reason: "num_neighbors must be at least 1".to_string(),
            });
        }

        let embedding = self.embedder.embed(description, image).await?;
        let vectors = embedding.into_vectors();
        debug!(vectors = vectors.len(), "Embeddings computed");

        let neighbors: Vec<NeighborResult> = self
            .index
            .nearest_neighbors(&vectors, num_neighbors)
            .await?
            .into_iter()
            .flatten()
            .collect();

        let matches = neighbors
            .into_iter()
            .map(|n| -> CategorizeResult<_> { Ok((n.product_id()?, n.distance)) })
            .collect::<CategorizeResult<Vec<_>>>()?;

        let ids: BTreeSet<_> = matches.iter().map(|(id, _)| id.clone()).collect();
        let categories = if ids.is_empty() {
            Default::default()
        } else {
            self.resolver.resolve_default(&ids).await?
        };

        let mut candidates: Vec<Candidate> = matches
            .into_iter()
            .map(|(product_id, distance)| Candidate {
                category: categories.get(&product_id).cloned().unwrap_or_default(),
                product_id,
                distance,
            })
            .collect();

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        info!(
            candidates = candidates.len(),
            distinct_products = ids.len(),
            resolved = categories.len(),
            best_distance = candidates.first().map(|c| c.distance),
            "Retrieval complete"
        );

        Ok(candidates)
    }

    /// [`retrieve`](Self::retrieve) with the configured neighbor count.
    pub async fn retrieve_default(
        &self,
        description: &str,
        image: Option<&ImageRef>,
    ) -> CategorizeResult<Vec<Candidate>> {
        self.retrieve(description, image, self.config.num_neighbors)
            .await
    }
}
