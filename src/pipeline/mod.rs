//! Retrieve → rank composition.

use tracing::{debug, info, instrument};

use crate::catalog::{CategoryPath, CategoryStore};
use crate::embedding::{Embedder, ImageRef};
use crate::error::CategorizeResult;
use crate::ranking::CategoryRanker;
use crate::retrieval::CandidateRetriever;
use crate::vectordb::NeighborIndex;


/// Retrieves candidates for a description and re-ranks their category paths.
///
/// Retrieval errors propagate. Ranking cannot fail: it degrades to retrieval order.
/// Candidates whose product was missing from the category store carry no path and are not
/// passed to the ranker.
pub struct CategoryPipeline<E: Embedder, N: NeighborIndex, S: CategoryStore> {
    retriever: CandidateRetriever<E, N, S>,
    ranker: CategoryRanker,
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> std::fmt::Debug
    for CategoryPipeline<E, N, S>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryPipeline")
            .field("retriever", &self.retriever)
            .field("ranker", &self.ranker)
            .finish()
    }
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> CategoryPipeline<E, N, S> {
    pub fn new(retriever: CandidateRetriever<E, N, S>, ranker: CategoryRanker) -> Self {
        Self { retriever, ranker }
    }

    pub fn retriever(&self) -> &CandidateRetriever<E, N, S> {
        &self.retriever
    }

    pub fn ranker(&self) -> &CategoryRanker {
        &self.ranker
    }

    #[instrument(skip(self, description, image), fields(with_image = image.is_some()))]
    pub async fn retrieve_and_rank(
        &self,
        description: &str,
        image: Option<&ImageRef>,
        num_neighbors: u64,
    ) -> CategorizeResult<Vec<CategoryPath>> {
        let candidates = self
            .retriever
            .retrieve(description, image, num_neighbors)
            .await?;

        let total = candidates.len();
        let paths: Vec<CategoryPath> = candidates
            .into_iter()
            .map(|c| c.category)
            .filter(|p| !p.is_empty())
            .collect();
        if paths.len() < total {
            debug!(
                unresolved = total - paths.len(),
                "Dropping candidates without a resolved category"
            );
        }

        let ranked = self.ranker.rank(description, &paths).await;

        info!(
            candidates = paths.len(),
            ranked = ranked.len(),
            top = ?ranked.first(),
            "Categorization complete"
        );

        Ok(ranked)
    }

    /// [`retrieve_and_rank`](Self::retrieve_and_rank) with the configured neighbor count.
    pub async fn retrieve_and_rank_default(
        &self,
        description: &str,
        image: Option<&ImageRef>,
    ) -> CategorizeResult<Vec<CategoryPath>> {
        let k = self.retriever.config().num_neighbors;
        self.retrieve_and_rank(description, image, k).await
    }
}
