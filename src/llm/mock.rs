//! Scripted text generator for tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::{GenerationOptions, TextGenerator};
use super::error::LlmError;

/// Replays queued responses in order; once the queue is empty, returns the default reply.
#[derive(Default, Clone)]
pub struct MockTextGenerator {
    queue: Arc<Mutex<VecDeque<Result<String, String>>>>,
    default_reply: Arc<Mutex<String>>,
    prompts: Arc<Mutex<Vec<(String, GenerationOptions)>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that always answers `reply`.
    pub fn replying(reply: &str) -> Self {
        let generator = Self::default();
        *generator.default_reply.lock() = reply.to_string();
        generator
    }

    pub fn push_reply(&self, reply: &str) {
        self.queue.lock().push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self, message: &str) {
        self.queue.lock().push_back(Err(message.to_string()));
    }

    /// Prompts and options received so far.
    pub fn prompts(&self) -> Vec<(String, GenerationOptions)> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, LlmError> {
        self.prompts.lock().push((prompt.to_string(), *options));

        let next = self.queue.lock().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(LlmError::GenerationFailed {
                model: self.model_name().to_string(),
                message,
            }),
            None => Ok(self.default_reply.lock().clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
