//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::{EmbeddingProvider, Settings};
use crate::error::{KursError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Running the agent needs the chat model and the embedder.
    Agent,
    /// Indexing and catalog search only need the embedder.
    Index,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    let needs_key = match operation {
        Operation::Agent => settings.uses_openai(),
        Operation::Index => settings.embedding.provider == EmbeddingProvider::OpenAI,
    };

    if needs_key {
        check_api_key()?;
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(KursError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(KursError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_with_hash_embeddings_needs_no_key() {
        let mut settings = Settings::default();
        settings.embedding.provider = EmbeddingProvider::Hash;
        assert!(check(Operation::Index, &settings).is_ok());
    }

    #[test]
    fn test_local_model_needs_no_key() {
        let mut settings = Settings::default();
        settings.embedding.provider = EmbeddingProvider::Hash;
        settings.llm.api_base = Some("http://localhost:11434/v1".to_string());
        assert!(check(Operation::Agent, &settings).is_ok());
    }
}
