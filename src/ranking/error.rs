use thiserror::Error;

use crate::llm::LlmError;

/// Reasons a ranking attempt falls back to the original order.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("LLM call failed: {0}")]
    Generation(#[from] LlmError),

    #[error("no LLM response returned")]
    EmptyResponse,

    #[error("response path '{response}' has {actual} levels but candidates have {expected}")]
    SchemaMismatch {
        response: String,
        expected: usize,
        actual: usize,
    },
}
