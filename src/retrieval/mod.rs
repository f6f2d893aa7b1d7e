//! Embedding-based candidate retrieval.

pub mod config;
pub mod model;
pub mod retriever;


pub use config::RetrieverConfig;
pub use model::Candidate;
pub use retriever::CandidateRetriever;
