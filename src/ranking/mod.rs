//! LLM re-ranking of candidate category paths.
//!
//! [`CategoryRanker::rank`] never fails. Anything that goes wrong while asking the LLM or
//! reading its answer is logged and the deduplicated candidates come back in their original
//! order.

pub mod config;
pub mod error;
pub mod prompt;
pub mod ranker;


pub use config::RankerConfig;
pub use error::RankError;
pub use prompt::{build_prompt, dedup_paths, parse_response, strip_ordinal};
pub use ranker::CategoryRanker;
