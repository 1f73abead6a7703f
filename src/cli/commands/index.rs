//! Index command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::create_embedder;
use crate::indexer::{CatalogIndex, CorpusIndexer};
use anyhow::Result;

/// Build the catalog index and print a report.
pub async fn run_index(file: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(file) = file {
        settings.catalog.path = file;
    }

    if let Err(e) = preflight::check(Operation::Index, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let catalog_path = settings.catalog_path();
    let embedder = create_embedder(&settings.embedding, &settings.llm)?;

    let spinner = Output::spinner(&format!("Indexing {}...", catalog_path.display()));
    let index = CorpusIndexer::new(embedder, (&settings.chunking).into())
        .build(&catalog_path)
        .await;
    spinner.finish_and_clear();

    match &index {
        CatalogIndex::Ready { store, report } => {
            Output::success(&format!(
                "Indexed {} courses into {} chunks",
                report.records, report.chunks
            ));
            Output::kv("Catalog", &catalog_path.display().to_string());
            Output::kv("Chunk size", &settings.chunking.chunk_size.to_string());
            Output::kv("Chunk overlap", &settings.chunking.chunk_overlap.to_string());
            Output::kv("Built at", &report.built_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
            if report.unknown_languages > 0 {
                Output::warning(&format!(
                    "{} course(s) list an unrecognized language code",
                    report.unknown_languages
                ));
            }

            let courses = store.list_courses().await?;
            if !courses.is_empty() {
                Output::header("Courses");
                for course in &courses {
                    Output::course_info(&course.course_title, course.chunk_count);
                }
            }
        }
        CatalogIndex::Unavailable { reason } => {
            Output::error(&format!("Course catalog is not available: {}", reason));
            return Err(anyhow::anyhow!("{}", reason));
        }
    }

    Ok(())
}
