//! Configuration module for Kurs.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts, RetrievalPrompts};
pub use settings::{
    AgentSettings, CatalogSettings, ChunkingSettings, EarlyStopping, EmbeddingProvider,
    EmbeddingSettings, GeneralSettings, LlmSettings, PromptSettings, RetrievalSettings, Settings,
    WebSearchSettings,
};
