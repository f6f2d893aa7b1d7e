use std::sync::Arc;

use crate::catalog::CategoryStore;
use crate::embedding::Embedder;
use crate::pipeline::CategoryPipeline;
use crate::vectordb::NeighborIndex;

/// Shared handler state. Cloned per request; the pipeline itself is shared.
pub struct HandlerState<E: Embedder, N: NeighborIndex, S: CategoryStore> {
    pub pipeline: Arc<CategoryPipeline<E, N, S>>,
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> Clone for HandlerState<E, N, S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<E: Embedder, N: NeighborIndex, S: CategoryStore> HandlerState<E, N, S> {
    pub fn new(pipeline: CategoryPipeline<E, N, S>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
