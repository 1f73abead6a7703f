//! External web search.
//!
//! The agent reaches the open web through the `web_search` tool, which
//! delegates to a [`SearchProvider`] and hands back its text unchanged.

mod duckduckgo;

pub use duckduckgo::{DuckDuckGoProvider, NO_RESULTS};

use crate::agent::Tool;
use crate::config::WebSearchSettings;
use crate::error::{KursError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Trait for web search backends.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return a plain-text digest of the results.
    async fn search(&self, query: &str) -> Result<String>;

    /// Provider identifier, for logging.
    fn name(&self) -> &str;
}

/// Create a search provider based on settings.
pub fn create_provider(settings: &WebSearchSettings) -> Result<Arc<dyn SearchProvider>> {
    match settings.provider.to_lowercase().as_str() {
        "duckduckgo" | "ddg" => Ok(Arc::new(DuckDuckGoProvider::from_settings(settings)?)),
        other => Err(KursError::Config(format!(
            "Unknown web search provider: {}",
            other
        ))),
    }
}

const DESCRIPTION: &str = "Searches the web for current events, locations, or general knowledge \
that is not about the course catalog. Input should be a search query.";

/// Web search exposed to the agent as `web_search`.
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl WebSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    #[instrument(skip(self))]
    async fn invoke(&self, query: &str) -> Result<String> {
        debug!("Searching the web with {}", self.provider.name());
        self.provider.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: Result<String>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for CannedProvider {
        async fn search(&self, query: &str) -> Result<String> {
            self.queries.lock().unwrap().push(query.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(KursError::WebSearch(e.to_string())),
            }
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn test_tool_returns_provider_text_verbatim() {
        let provider = Arc::new(CannedProvider {
            reply: Ok("  Lalbagh nursery sells seeds.\n".to_string()),
            queries: Mutex::new(Vec::new()),
        });
        let tool = WebSearchTool::new(provider.clone());

        let output = tool.invoke("seeds in Whitefield").await.unwrap();

        assert_eq!(output, "  Lalbagh nursery sells seeds.\n");
        assert_eq!(*provider.queries.lock().unwrap(), vec!["seeds in Whitefield"]);
    }

    #[tokio::test]
    async fn test_tool_propagates_provider_error() {
        let tool = WebSearchTool::new(Arc::new(CannedProvider {
            reply: Err(KursError::WebSearch("connection reset".to_string())),
            queries: Mutex::new(Vec::new()),
        }));

        let err = tool.invoke("weather today").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_create_provider_rejects_unknown() {
        let settings = WebSearchSettings {
            provider: "altavista".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&settings).is_err());
        assert!(create_provider(&WebSearchSettings::default()).is_ok());
    }
}
