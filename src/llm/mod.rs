//! LLM text generation.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{GenaiGenerator, GenerationOptions, TextGenerator};
pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTextGenerator;
