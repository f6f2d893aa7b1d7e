use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::EmbeddingError;

/// Where an image lives. The caller decides which form it is passing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ImageRef {
    /// File on the local filesystem, read and encoded before sending.
    #[serde(rename = "path")]
    LocalPath(PathBuf),
    /// Remote object storage URI (e.g. `gs://bucket/image.jpg`), passed through as-is.
    #[serde(rename = "uri")]
    RemoteUri(String),
    /// Base64-encoded image bytes.
    #[serde(rename = "base64")]
    InlineBase64(String),
}

/// One vector per modality.
#[derive(Debug, Clone, PartialEq)]
pub struct MultimodalEmbedding {
    pub text: Vec<f32>,
    pub image: Option<Vec<f32>>,
}

impl MultimodalEmbedding {
    pub fn text_only(text: Vec<f32>) -> Self {
        Self { text, image: None }
    }

    /// Text vector first, then the image vector if present.
    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        let mut vectors = Vec::with_capacity(2);
        vectors.push(self.text);
        if let Some(image) = self.image {
            vectors.push(image);
        }
        vectors
    }

    pub fn modalities(&self) -> usize {
        1 + usize::from(self.image.is_some())
    }
}

/// Computes embeddings for a description and an optional image.
pub trait Embedder: Send + Sync {
    /// Returns a text embedding, plus an image embedding when `image` is given.
    fn embed(
        &self,
        text: &str,
        image: Option<&ImageRef>,
    ) -> impl std::future::Future<Output = Result<MultimodalEmbedding, EmbeddingError>> + Send;
}
