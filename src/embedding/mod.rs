//! Text and image embedding.
//!
//! - [`HttpEmbedder`] calls a multimodal embedding endpoint.
//! - [`StubEmbedder`] produces deterministic vectors for tests and local runs.

pub mod client;
mod error;
pub mod http;
pub mod stub;


pub use client::{Embedder, ImageRef, MultimodalEmbedding};
pub use error::EmbeddingError;
pub use http::{HttpEmbedder, HttpEmbedderConfig};
pub use stub::StubEmbedder;
