//! Language model abstraction.
//!
//! The assistant only needs plain text completion: a prompt goes in,
//! text comes out. Both the grounded extraction step and the agent's
//! reasoning loop go through [`LanguageModel`].

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// A single completion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// Fully rendered prompt.
    pub prompt: String,
    /// Sequences at which generation should stop.
    pub stop: Vec<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            stop: Vec::new(),
        }
    }

    pub fn with_stop(mut self, stop: &str) -> Self {
        self.stop.push(stop.to_string());
        self
    }
}

/// Trait for text completion backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete the prompt and return the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
