use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("generation with model '{model}' failed: {message}")]
    GenerationFailed { model: String, message: String },

    #[error("invalid generation options: {reason}")]
    InvalidOptions { reason: String },
}
