//! Error types for Kurs.

use thiserror::Error;

/// Library-level error type for Kurs operations.
#[derive(Error, Debug)]
pub enum KursError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Course data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Language model error: {0}")]
    Llm(String),

    #[error("Web search failed: {0}")]
    WebSearch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Kurs operations.
pub type Result<T> = std::result::Result<T, KursError>;
