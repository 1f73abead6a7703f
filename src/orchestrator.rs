//! Assembly of the assistant.
//!
//! Builds the catalog index once, then wires the model, the tools and the
//! prompts into an [`Agent`].

use crate::agent::{Agent, ToolRegistry};
use crate::config::{Prompts, Settings};
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::indexer::{build_index, CatalogIndex};
use crate::llm::{LanguageModel, OpenAIChatModel};
use crate::rag::CourseSearchTool;
use crate::session::ChatSession;
use crate::web_search::{create_provider, WebSearchTool};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Owns the shared components of the assistant.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LanguageModel>,
    index: CatalogIndex,
}

impl Orchestrator {
    /// Load prompts, create the model clients and build the catalog index.
    #[instrument(skip(settings))]
    pub async fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder = create_embedder(&settings.embedding, &settings.llm)?;
        let llm: Arc<dyn LanguageModel> = Arc::new(OpenAIChatModel::from_settings(&settings.llm)?);
        info!("Using model {} for reasoning and extraction", llm.model_name());

        let index = build_index(
            &settings.catalog_path(),
            Arc::clone(&embedder),
            (&settings.chunking).into(),
        )
        .await;

        if let CatalogIndex::Unavailable { reason } = &index {
            warn!("Continuing without the course catalog: {}", reason);
        }

        Ok(Self::with_components(settings, prompts, embedder, llm, index))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LanguageModel>,
        index: CatalogIndex,
    ) -> Self {
        Self {
            settings,
            prompts,
            embedder,
            llm,
            index,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// The `course_search` tool over this orchestrator's index.
    pub fn course_search_tool(&self) -> CourseSearchTool {
        CourseSearchTool::new(
            &self.index,
            Arc::clone(&self.embedder),
            Arc::clone(&self.llm),
            self.settings.retrieval.top_k,
        )
        .with_prompts(self.prompts.clone())
    }

    /// The `web_search` tool using the configured provider.
    pub fn web_search_tool(&self) -> Result<WebSearchTool> {
        Ok(WebSearchTool::new(create_provider(&self.settings.web_search)?))
    }

    /// Create the decision agent with both tools.
    pub fn create_agent(&self) -> Result<Agent> {
        let tools = ToolRegistry::new()
            .with_tool(Arc::new(self.course_search_tool()))
            .with_tool(Arc::new(self.web_search_tool()?));

        Ok(Agent::new(Arc::clone(&self.llm), tools)
            .with_prompts(self.prompts.clone())
            .with_max_iterations(self.settings.agent.max_iterations)
            .with_early_stopping(self.settings.agent.early_stopping))
    }

    /// Start a new conversation with the configured greeting.
    pub fn new_session(&self, agent: Arc<Agent>) -> ChatSession {
        ChatSession::new(agent, &self.settings.agent.greeting)
    }
}

/// Build the index and return a ready agent.
pub async fn create_agent(settings: &Settings) -> Result<Agent> {
    Orchestrator::new(settings.clone()).await?.create_agent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EarlyStopping, EmbeddingProvider};
    use crate::embedding::HashEmbedder;
    use crate::memory::ConversationTurn;
    use crate::testing::{write_catalog, ScriptedModel};

    fn hash_settings(catalog: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.catalog.path = catalog.to_string_lossy().to_string();
        settings.embedding.provider = EmbeddingProvider::Hash;
        settings.embedding.dimensions = 256;
        settings
    }

    #[tokio::test]
    async fn test_new_builds_index_from_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(dir.path(), &["Goat Rearing,Raise goats.,Farmers,7"]);

        let orchestrator = Orchestrator::new(hash_settings(&path)).await.unwrap();

        assert!(orchestrator.index().is_available());
        assert_eq!(orchestrator.index().report().unwrap().records, 1);
    }

    #[tokio::test]
    async fn test_missing_catalog_still_creates_agent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = hash_settings(&dir.path().join("absent.csv"));

        let agent = create_agent(&settings).await.unwrap();

        assert_eq!(agent.tools().render_names(), "course_search, web_search");
    }

    #[tokio::test]
    async fn test_agent_follows_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = hash_settings(&dir.path().join("absent.csv"));
        settings.agent.max_iterations = 5;
        settings.agent.early_stopping = EarlyStopping::Generate;
        settings.agent.greeting = "Namaste!".to_string();

        let llm = Arc::new(ScriptedModel::replies(vec!["Final Answer: Namaste, how can I help?"]));
        let orchestrator = Orchestrator::with_components(
            settings,
            Prompts::default(),
            Arc::new(HashEmbedder::default()),
            llm,
            CatalogIndex::unavailable("absent"),
        );

        let agent = orchestrator.create_agent().unwrap();
        assert_eq!(agent.max_iterations(), 5);

        let mut session = orchestrator.new_session(Arc::new(agent));
        assert_eq!(session.send("hi").await, "Namaste, how can I help?");
        assert_eq!(session.memory().all()[0], ConversationTurn::assistant("Namaste!"));
    }
}
