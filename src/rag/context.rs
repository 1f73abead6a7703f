//! Context building for catalog retrieval.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{SearchResult, VectorStore};
use std::sync::Arc;
use tracing::debug;

/// Retrieves the nearest course chunks for a query.
pub struct ContextBuilder {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl ContextBuilder {
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            top_k: 3,
        }
    }

    /// Set the number of chunks retrieved per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve the `top_k` nearest chunks, best first.
    ///
    /// Chunks with equal similarity come back in catalog order.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.search(&query_embedding, self.top_k).await?;

        debug!(
            "Retrieved {} chunks: {:?}",
            results.len(),
            results
                .iter()
                .map(|r| format!("{} ({:.3})", r.chunk.course_title, r.score))
                .collect::<Vec<_>>()
        );

        Ok(results)
    }

    /// Retrieve and join the chunk texts into a single context block.
    pub async fn build(&self, query: &str) -> Result<String> {
        let results = self.retrieve(query).await?;
        Ok(format_context_for_prompt(&results))
    }
}

/// Join chunk texts with blank lines, preserving rank order.
pub fn format_context_for_prompt(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::IndexedChunk;

    #[test]
    fn test_format_context_joins_with_blank_lines() {
        let results = vec![
            SearchResult {
                chunk: IndexedChunk::new("A".into(), 0, 0, "Course Title: A".into(), vec![]),
                score: 0.9,
            },
            SearchResult {
                chunk: IndexedChunk::new("B".into(), 1, 0, "Course Title: B".into(), vec![]),
                score: 0.5,
            },
        ];

        assert_eq!(
            format_context_for_prompt(&results),
            "Course Title: A\n\nCourse Title: B"
        );
    }
}
