//! In-memory vector store implementation.
//!
//! Brute-force cosine search over chunks kept in insertion order.

use super::{cosine_similarity, IndexedChunk, IndexedCourse, SearchResult, VectorStore};
use crate::error::{KursError, Result};
use async_trait::async_trait;

/// Immutable in-memory vector store.
pub struct MemoryVectorStore {
    chunks: Vec<IndexedChunk>,
    dimensions: Option<usize>,
}

impl MemoryVectorStore {
    /// Build a store from chunks. All embeddings must share one dimension.
    pub fn from_chunks(chunks: Vec<IndexedChunk>) -> Result<Self> {
        let dimensions = chunks.first().map(|c| c.embedding.len());

        if let Some(dims) = dimensions {
            if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != dims) {
                return Err(KursError::VectorStore(format!(
                    "Chunk of '{}' has {} dimensions, expected {}",
                    bad.course_title,
                    bad.embedding.len(),
                    dims
                )));
            }
        }

        Ok(Self { chunks, dimensions })
    }

    /// An index with no chunks.
    pub fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            dimensions: None,
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::NEG_INFINITY).await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        if let Some(dims) = self.dimensions {
            if query_embedding.len() != dims {
                return Err(KursError::VectorStore(format!(
                    "Query has {} dimensions, index has {}",
                    query_embedding.len(),
                    dims
                )));
            }
        }

        let mut results: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(query_embedding, &chunk.embedding),
            })
            .filter(|r| r.score >= min_score)
            .collect();

        // sort_by is stable: ties stay in insertion (catalog) order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        Ok(results)
    }

    async fn list_courses(&self) -> Result<Vec<IndexedCourse>> {
        let mut courses: Vec<IndexedCourse> = Vec::new();

        for chunk in &self.chunks {
            match courses.last_mut() {
                Some(course) if course.record_index == chunk.record_index => {
                    course.chunk_count += 1;
                }
                _ => courses.push(IndexedCourse {
                    course_title: chunk.course_title.clone(),
                    record_index: chunk.record_index,
                    chunk_count: 1,
                }),
            }
        }

        Ok(courses)
    }

    async fn chunk_count(&self) -> Result<usize> {
        Ok(self.chunks.len())
    }
}
