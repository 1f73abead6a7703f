//! Configuration settings for Kurs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub catalog: CatalogSettings,
    pub embedding: EmbeddingSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub agent: AgentSettings,
    pub web_search: WebSearchSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Location of the course table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Path to the course CSV file.
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: "data/courses.csv".to_string(),
        }
    }
}

/// Embedding backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI embeddings API.
    #[default]
    OpenAI,
    /// Local feature-hashing embedder (no network, fully deterministic).
    Hash,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAI),
            "hash" | "local" => Ok(EmbeddingProvider::Hash),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::OpenAI => write!(f, "openai"),
            EmbeddingProvider::Hash => write!(f, "hash"),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai, hash).
    pub provider: EmbeddingProvider,
    /// Embedding model to use (openai provider only).
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::OpenAI,
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks of one record.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
        }
    }
}

/// Catalog retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of nearest chunks fed to the extraction prompt.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model used for both reasoning and extraction.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional OpenAI-compatible API base (e.g. a local server).
    pub api_base: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
            api_base: None,
        }
    }
}

/// What the agent does once the step budget is spent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EarlyStopping {
    /// Return a fixed "could not complete" message.
    #[default]
    Force,
    /// Ask the model once more for a final answer from the steps so far.
    Generate,
}

/// Decision agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum Think/Act/Observe cycles per question.
    pub max_iterations: usize,
    /// Behaviour when the budget is exhausted.
    pub early_stopping: EarlyStopping,
    /// First assistant message of every session.
    pub greeting: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            early_stopping: EarlyStopping::Force,
            greeting: crate::memory::DEFAULT_GREETING.to_string(),
        }
    }
}

/// External web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchSettings {
    /// Search provider (duckduckgo).
    pub provider: String,
    /// Maximum number of result snippets returned.
    pub max_results: usize,
    /// DuckDuckGo region code.
    pub region: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WebSearchSettings {
    fn default() -> Self {
        Self {
            provider: "duckduckgo".to_string(),
            max_results: 5,
            region: "wt-wt".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::KursError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kurs")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded course CSV path.
    pub fn catalog_path(&self) -> PathBuf {
        Self::expand_path(&self.catalog.path)
    }

    /// Whether any configured component talks to the OpenAI API.
    pub fn uses_openai(&self) -> bool {
        // The chat model is always OpenAI-compatible; only a custom base
        // may make the key unnecessary.
        self.embedding.provider == EmbeddingProvider::OpenAI || self.llm.api_base.is_none()
    }
}
