use crate::constants::{DEFAULT_MAX_OUTPUT_TOKENS, RANKING_TEMPERATURE};
use crate::llm::GenerationOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    /// Output token budget for the ranking call.
    pub max_output_tokens: u32,

    /// Append candidates the LLM left out, in original order, after the ranked ones.
    pub pad_missing: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            pad_missing: true,
        }
    }
}

impl RankerConfig {
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn pad_missing(mut self, pad: bool) -> Self {
        self.pad_missing = pad;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be at least 1".to_string());
        }
        Ok(())
    }

    /// Ranking always decodes at temperature 0.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            max_output_tokens: self.max_output_tokens,
            temperature: RANKING_TEMPERATURE,
        }
    }
}
