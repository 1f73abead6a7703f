//! Tool abstraction and registry for the agent.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A capability the agent can invoke with a single free-text input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses in `Action:` lines.
    fn name(&self) -> &str;

    /// Description rendered into the tool catalog of the prompt.
    fn description(&self) -> &str;

    /// Run the tool and return its output verbatim.
    async fn invoke(&self, query: &str) -> Result<String>;
}

/// Ordered collection of tools available to the agent.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Render `name: description` lines for the prompt.
    pub fn render_catalog(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-separated tool names, e.g. `course_search, web_search`.
    pub fn render_names(&self) -> String {
        self.names().join(", ")
    }
}
