//! The `course_search` tool.

use super::ContextBuilder;
use crate::agent::Tool;
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::indexer::CatalogIndex;
use crate::llm::{CompletionRequest, LanguageModel};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Returned verbatim when the catalog index could not be built.
pub const DATABASE_UNAVAILABLE: &str = "Sorry, the course database is not available.";

/// Sentence the extraction prompt demands when nothing in the context fits.
pub const NO_RELEVANT_COURSES: &str = "No relevant courses found.";

const DESCRIPTION: &str = "Searches the course catalog to answer questions about courses. \
Use this for any questions about course content, descriptions, languages, or target audience.";

/// Catalog retriever exposed to the agent as `course_search`.
///
/// Retrieves the nearest chunks, then asks the language model to answer
/// strictly from that context.
pub struct CourseSearchTool {
    context_builder: Option<ContextBuilder>,
    llm: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl CourseSearchTool {
    pub fn new(
        index: &CatalogIndex,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LanguageModel>,
        top_k: usize,
    ) -> Self {
        let context_builder = index
            .store()
            .map(|store| ContextBuilder::new(Arc::clone(store), embedder).with_top_k(top_k));

        Self {
            context_builder,
            llm,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Look up courses for a query and return the model's grounded answer.
    #[instrument(skip(self))]
    pub async fn course_search(&self, query: &str) -> Result<String> {
        let Some(context_builder) = &self.context_builder else {
            info!("Course search skipped: index unavailable");
            return Ok(DATABASE_UNAVAILABLE.to_string());
        };

        let context = context_builder.build(query).await?;

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context);
        vars.insert("query".to_string(), query.to_string());
        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.retrieval.extraction, &vars);

        self.llm.complete(&CompletionRequest::new(prompt)).await
    }
}

#[async_trait]
impl Tool for CourseSearchTool {
    fn name(&self) -> &str {
        "course_search"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        self.course_search(query).await
    }
}
