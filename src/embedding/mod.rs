//! Embedding generation for semantic search and retrieval.

mod hash;
mod openai;

pub use hash::HashEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, EmbeddingSettings, LlmSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
///
/// Implementations must be deterministic for identical input so that an
/// index rebuilt from the same corpus answers queries identically.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Create the embedder selected in the settings.
pub fn create_embedder(settings: &EmbeddingSettings, llm: &LlmSettings) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match settings.provider {
        EmbeddingProvider::OpenAI => Arc::new(OpenAIEmbedder::from_settings(settings, llm)?),
        EmbeddingProvider::Hash => Arc::new(HashEmbedder::new(settings.dimensions as usize)),
    };
    Ok(embedder)
}
