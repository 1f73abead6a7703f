//! Text chunking for course documents.
//!
//! Splits a record's combined text into bounded, overlapping spans that are
//! embedded independently.

mod recursive;

pub use recursive::RecursiveChunker;

use crate::config::ChunkingSettings;

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Maximum characters carried over from one chunk into the next.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
        }
    }
}

/// Trait for text chunking implementations.
pub trait Chunker: Send + Sync {
    /// Split text into chunks. Whitespace-only chunks are never returned.
    fn split(&self, text: &str) -> Vec<String>;
}
