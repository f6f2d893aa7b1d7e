use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::debug;

use crate::constants::STUB_EMBEDDING_DIM;

use super::client::{Embedder, ImageRef, MultimodalEmbedding};
use super::error::EmbeddingError;

/// Deterministic embedder: equal inputs give equal unit vectors. No semantic meaning.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    embedding_dim: usize,
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self {
            embedding_dim: STUB_EMBEDDING_DIM,
        }
    }
}

impl StubEmbedder {
    pub fn new(embedding_dim: usize) -> Result<Self, EmbeddingError> {
        if embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }
        Ok(Self { embedding_dim })
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn vector_for<T: Hash + ?Sized>(&self, value: &T) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.embedding_dim);
        for _ in 0..self.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }
        embedding
    }
}

impl Embedder for StubEmbedder {
    async fn embed(
        &self,
        text: &str,
        image: Option<&ImageRef>,
    ) -> Result<MultimodalEmbedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        debug!(text_len = text.len(), "Generating stub embedding");

        Ok(MultimodalEmbedding {
            text: self.vector_for(text),
            image: image.map(|img| self.vector_for(&format!("{:?}", img))),
        })
    }
}
