//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::create_embedder;
use crate::indexer::{CatalogIndex, CorpusIndexer};
use crate::rag::ContextBuilder;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    limit: usize,
    min_score: Option<f32>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Index, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let embedder = create_embedder(&settings.embedding, &settings.llm)?;

    let spinner = Output::spinner("Indexing course catalog...");
    let index = CorpusIndexer::new(embedder.clone(), (&settings.chunking).into())
        .build(&settings.catalog_path())
        .await;
    spinner.finish_and_clear();

    let store = match &index {
        CatalogIndex::Ready { store, .. } => store.clone(),
        CatalogIndex::Unavailable { reason } => {
            Output::error(&format!("Course catalog is not available: {}", reason));
            return Err(anyhow::anyhow!("{}", reason));
        }
    };

    let results = match min_score {
        Some(min_score) => {
            let query_embedding = embedder.embed(query).await?;
            store
                .search_with_threshold(&query_embedding, limit, min_score)
                .await?
        }
        None => {
            ContextBuilder::new(store, embedder)
                .with_top_k(limit)
                .retrieve(query)
                .await?
        }
    };

    if results.is_empty() {
        Output::warning("No results found matching your query.");
    } else {
        Output::success(&format!("Found {} results", results.len()));
        for result in &results {
            Output::search_result(&result.chunk.course_title, result.score, &result.chunk.content);
        }
    }

    Ok(())
}
