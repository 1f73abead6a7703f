//! Corpus indexing.
//!
//! Turns the course table into embedded chunks and a searchable index.
//! The build runs once before any question is answered; its result is an
//! immutable [`CatalogIndex`] handle that tools share by reference.

use crate::catalog::{load_courses, CourseRecord};
use crate::chunking::{Chunker, ChunkingConfig, RecursiveChunker};
use crate::embedding::Embedder;
use crate::error::{KursError, Result};
use crate::vector_store::{IndexedChunk, MemoryVectorStore, VectorStore};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Statistics about a completed index build.
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Number of course records read.
    pub records: usize,
    /// Number of chunks embedded and indexed.
    pub chunks: usize,
    /// Records carrying at least one unrecognized language code.
    pub unknown_languages: usize,
    /// When the build finished.
    pub built_at: DateTime<Utc>,
}

/// Outcome of an index build.
///
/// An unavailable index is a normal state: every consumer must handle it
/// instead of assuming the catalog loaded.
#[derive(Clone)]
pub enum CatalogIndex {
    Ready {
        store: Arc<dyn VectorStore>,
        report: IndexReport,
    },
    Unavailable {
        reason: String,
    },
}

impl CatalogIndex {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        CatalogIndex::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CatalogIndex::Ready { .. })
    }

    pub fn store(&self) -> Option<&Arc<dyn VectorStore>> {
        match self {
            CatalogIndex::Ready { store, .. } => Some(store),
            CatalogIndex::Unavailable { .. } => None,
        }
    }

    pub fn report(&self) -> Option<&IndexReport> {
        match self {
            CatalogIndex::Ready { report, .. } => Some(report),
            CatalogIndex::Unavailable { .. } => None,
        }
    }
}

impl std::fmt::Debug for CatalogIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIndex::Ready { report, .. } => f
                .debug_struct("Ready")
                .field("records", &report.records)
                .field("chunks", &report.chunks)
                .finish(),
            CatalogIndex::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Builds the catalog index from course records.
pub struct CorpusIndexer {
    embedder: Arc<dyn Embedder>,
    chunker: RecursiveChunker,
}

impl CorpusIndexer {
    pub fn new(embedder: Arc<dyn Embedder>, config: ChunkingConfig) -> Self {
        Self {
            embedder,
            chunker: RecursiveChunker::new(config),
        }
    }

    /// Build the index from a CSV file. Never fails: any problem yields
    /// [`CatalogIndex::Unavailable`].
    #[instrument(skip(self))]
    pub async fn build(&self, path: &Path) -> CatalogIndex {
        let result = match load_courses(path) {
            Ok(records) => self.build_from_records(&records).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(index) => index,
            Err(e) => {
                warn!("Course index unavailable: {}", e);
                CatalogIndex::unavailable(e.to_string())
            }
        }
    }

    /// Chunk, embed and index already-loaded records.
    pub async fn build_from_records(&self, records: &[CourseRecord]) -> Result<CatalogIndex> {
        let mut pending: Vec<(usize, usize, String)> = Vec::new();
        for (record_index, record) in records.iter().enumerate() {
            for (order, text) in self.chunker.split(&record.combined_text()).into_iter().enumerate() {
                pending.push((record_index, order, text));
            }
        }

        let texts: Vec<String> = pending.iter().map(|(_, _, text)| text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(KursError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let chunks: Vec<IndexedChunk> = pending
            .into_iter()
            .zip(embeddings)
            .map(|((record_index, order, text), embedding)| {
                IndexedChunk::new(
                    records[record_index].title.clone(),
                    record_index,
                    order,
                    text,
                    embedding,
                )
            })
            .collect();

        let report = IndexReport {
            records: records.len(),
            chunks: chunks.len(),
            unknown_languages: records.iter().filter(|r| r.has_unknown_language()).count(),
            built_at: Utc::now(),
        };

        info!(
            "Indexed {} courses into {} chunks ({} with unknown languages)",
            report.records, report.chunks, report.unknown_languages
        );

        let store = MemoryVectorStore::from_chunks(chunks)?;
        Ok(CatalogIndex::Ready {
            store: Arc::new(store),
            report,
        })
    }
}

/// Build the catalog index for a CSV file with the given embedder and chunking.
pub async fn build_index(
    path: &Path,
    embedder: Arc<dyn Embedder>,
    config: ChunkingConfig,
) -> CatalogIndex {
    CorpusIndexer::new(embedder, config).build(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;
    use crate::testing::{write_catalog, CATALOG_HEADER};

    fn indexer() -> CorpusIndexer {
        CorpusIndexer::new(Arc::new(HashEmbedder::default()), ChunkingConfig::default())
    }

    #[tokio::test]
    async fn test_build_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &[
                "Financial Freedom,Plan budgets and investments.,Salaried employees,\"6,24\"",
                "Poultry Farming,Raise broilers.,Small farmers,42",
            ],
        );

        let index = indexer().build(&path).await;

        assert!(index.is_available());
        let report = index.report().unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.chunks, 2);
        assert_eq!(report.unknown_languages, 1);

        let courses = index.store().unwrap().list_courses().await.unwrap();
        assert_eq!(courses[0].course_title, "Financial Freedom");
    }

    #[tokio::test]
    async fn test_unknown_language_code_indexed_as_unknown() {
        let records = vec![CourseRecord::new("Pickle Making", "Make pickles.", "Home cooks", "24, 77")];

        let index = indexer().build_from_records(&records).await.unwrap();
        let results = index
            .store()
            .unwrap()
            .search(&HashEmbedder::default().embed_text("pickles"), 3)
            .await
            .unwrap();

        assert!(results[0]
            .chunk
            .content
            .contains("Available Languages: English, Unknown"));
        assert!(!results[0].chunk.content.contains("77"));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let index = build_index(
            Path::new("/nonexistent/courses.csv"),
            Arc::new(HashEmbedder::default()),
            ChunkingConfig::default(),
        )
        .await;

        assert!(!index.is_available());
        assert!(index.store().is_none());
        match index {
            CatalogIndex::Unavailable { reason } => assert!(reason.contains("not found")),
            CatalogIndex::Ready { .. } => panic!("expected unavailable index"),
        }
    }

    #[tokio::test]
    async fn test_malformed_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");
        std::fs::write(&path, "Title,Description\nDairy,Milk\n").unwrap();

        assert!(!indexer().build(&path).await.is_available());
    }

    #[tokio::test]
    async fn test_header_only_catalog_is_empty_but_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");
        std::fs::write(&path, CATALOG_HEADER).unwrap();

        let index = indexer().build(&path).await;
        assert!(index.is_available());
        assert_eq!(index.report().unwrap().chunks, 0);
    }

    #[tokio::test]
    async fn test_long_record_is_split_into_ordered_chunks() {
        let about = (0..400).map(|i| format!("lesson{}", i)).collect::<Vec<_>>().join(" ");
        let records = vec![CourseRecord::new("Masterclass", &about, "Everyone", "24")];

        let index = indexer().build_from_records(&records).await.unwrap();
        let courses = index.store().unwrap().list_courses().await.unwrap();

        assert_eq!(courses.len(), 1);
        assert!(courses[0].chunk_count > 1);
    }

    #[tokio::test]
    async fn test_rebuild_gives_same_top_three() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            dir.path(),
            &[
                "Financial Freedom,Budgeting and investing.,Salaried employees,24",
                "Goat Farming,Rear goats for meat and milk.,Farmers,7",
                "Bakery Business,Bake and sell bread.,Home bakers,6",
                "Stock Market Basics,Learn investing in shares.,Beginners,24",
                "Tailoring,Stitch garments.,Homemakers,20",
            ],
        );
        let query = HashEmbedder::default().embed_text("investing money course");

        let mut rankings = Vec::new();
        for _ in 0..2 {
            let index = indexer().build(&path).await;
            let results = index.store().unwrap().search(&query, 3).await.unwrap();
            rankings.push(
                results
                    .into_iter()
                    .map(|r| (r.chunk.record_index, r.chunk.chunk_order, r.chunk.content))
                    .collect::<Vec<_>>(),
            );
        }

        assert_eq!(rankings[0].len(), 3);
        assert_eq!(rankings[0], rankings[1]);
    }
}
