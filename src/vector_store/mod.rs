//! Vector store abstraction for Kurs.
//!
//! Provides a trait-based interface over the similarity index that backs
//! catalog retrieval.

mod memory;

pub use memory::MemoryVectorStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chunk of a course record stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    /// Unique chunk ID.
    pub id: Uuid,
    /// Title of the course the chunk came from.
    pub course_title: String,
    /// Position of the course in the catalog source.
    pub record_index: usize,
    /// Order of this chunk within its course.
    pub chunk_order: usize,
    /// Text content of this chunk.
    pub content: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
}

impl IndexedChunk {
    pub fn new(
        course_title: String,
        record_index: usize,
        chunk_order: usize,
        content: String,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_title,
            record_index,
            chunk_order,
            content,
            embedding,
        }
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched chunk.
    pub chunk: IndexedChunk,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Summary information about an indexed course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedCourse {
    pub course_title: String,
    pub record_index: usize,
    pub chunk_count: usize,
}

/// Trait for read-only similarity indexes.
///
/// Stores are fully populated at construction and never mutated, so
/// implementations can be shared across sessions without locking.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Search for the `limit` chunks most similar to the query embedding.
    ///
    /// Equal scores keep insertion order.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// Search with a minimum similarity threshold.
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>>;

    /// List indexed courses in catalog order.
    async fn list_courses(&self) -> Result<Vec<IndexedCourse>>;

    /// Get total chunk count.
    async fn chunk_count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_or_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
