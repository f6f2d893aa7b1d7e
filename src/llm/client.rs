use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use crate::constants::{DEFAULT_MAX_OUTPUT_TOKENS, RANKING_TEMPERATURE};

use super::error::LlmError;

/// Decoding parameters for a single generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: RANKING_TEMPERATURE,
        }
    }
}

impl GenerationOptions {
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.max_output_tokens == 0 {
            return Err(LlmError::InvalidOptions {
                reason: "max_output_tokens must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidOptions {
                reason: format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    self.temperature
                ),
            });
        }
        Ok(())
    }
}

/// Single-prompt text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Generator backed by any provider `genai` supports (selected by model name).
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    model: String,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenaiGenerator {
    /// Uses the default `genai` client, which reads provider API keys from the environment.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GenaiGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, LlmError> {
        options.validate()?;

        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let chat_options = ChatOptions::default()
            .with_temperature(options.temperature)
            .with_max_tokens(options.max_output_tokens);

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            max_output_tokens = options.max_output_tokens,
            "Sending generation request"
        );

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&chat_options))
            .await
            .map_err(|e| LlmError::GenerationFailed {
                model: self.model.clone(),
                message: e.to_string(),
            })?;

        Ok(response.first_text().unwrap_or_default().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
