//! Recursive character splitting.
//!
//! Tries paragraph breaks first, then line breaks, then spaces, and finally
//! single characters, so a chunk is only cut mid-word when a word alone is
//! longer than the chunk size. Separators stay attached to the start of the
//! piece that follows them. All lengths are counted in characters.

use super::{Chunker, ChunkingConfig};
use std::collections::VecDeque;
use tracing::warn;

const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splitter that recursively falls back to finer separators.
pub struct RecursiveChunker {
    config: ChunkingConfig,
    separators: Vec<String>,
}

impl RecursiveChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        let config = ChunkingConfig {
            chunk_size: config.chunk_size.max(1),
            chunk_overlap: config.chunk_overlap.min(config.chunk_size.saturating_sub(1)),
        };
        Self {
            config,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        // First separator present in the text wins; "" always matches.
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() {
                separator = sep;
                break;
            }
            if text.contains(sep.as_str()) {
                separator = sep;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.config.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge(&pending));
                pending.clear();
            }
            if finer.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending));
        }

        chunks
    }

    /// Greedily pack small pieces into chunks, carrying a bounded tail of
    /// each chunk into the next one.
    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > size && !window.is_empty() {
                if total > size {
                    warn!("Created a chunk of {} characters, longer than the limit of {}", total, size);
                }
                if let Some(chunk) = join_window(&window) {
                    chunks.push(chunk);
                }
                while total > overlap || (total + len > size && total > 0) {
                    match window.pop_front() {
                        Some(front) => total -= char_len(front),
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(chunk) = join_window(&window) {
            chunks.push(chunk);
        }

        chunks
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

impl Chunker for RecursiveChunker {
    fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, &self.separators)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut parts = text.split(separator);
    let mut pieces = Vec::new();
    if let Some(first) = parts.next() {
        if !first.is_empty() {
            pieces.push(first.to_string());
        }
    }
    pieces.extend(parts.map(|p| format!("{}{}", separator, p)));
    pieces
}

fn join_window(window: &VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
