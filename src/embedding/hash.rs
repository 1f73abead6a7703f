//! Local feature-hashing embedder.
//!
//! Maps lowercase word unigrams and bigrams into a fixed number of signed
//! buckets and L2-normalizes the result. It needs no network access and is
//! fully deterministic, which makes it suitable for offline catalogs and
//! reproducible indexes.

use super::Embedder;
use crate::error::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Default dimensions, matching common small sentence-embedding models.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Deterministic bag-of-words embedder.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embed synchronously; the async trait methods delegate here.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        for token in &tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), 0.5);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::cosine_similarity;

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed_text("Financial Freedom for salaried employees");
        let b = embedder.embed_text("Financial Freedom for salaried employees");

        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_DIMENSIONS);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let embedder = HashEmbedder::new(128);
        assert_eq!(embedder.embed_text("Goat farming!"), embedder.embed_text("goat, FARMING"));
    }

    #[test]
    fn test_related_text_scores_higher() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed_text("financial freedom course");
        let related = embedder.embed_text("Course Title: Financial Freedom; About Course: budgeting and investing");
        let unrelated = embedder.embed_text("Course Title: Poultry Farming; About Course: broiler chickens");

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new(16);
        assert!(embedder.embed_text("  ").iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = HashEmbedder::new(64);
        let texts = vec!["dairy".to_string(), "bakery".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch[1], embedder.embed("bakery").await.unwrap());
    }
}
