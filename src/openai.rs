//! OpenAI client configuration with sensible defaults.

use crate::error::{KursError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (2 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Create an OpenAI client with the default timeout.
pub fn create_client() -> Result<Client<OpenAIConfig>> {
    create_client_with(Duration::from_secs(DEFAULT_TIMEOUT_SECS), None)
}

/// Create an OpenAI client with a custom timeout and optional API base.
///
/// A custom base lets the same client talk to OpenAI-compatible servers
/// such as a local Ollama instance.
pub fn create_client_with(timeout: Duration, api_base: Option<&str>) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| KursError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let mut config = OpenAIConfig::default();
    if let Some(base) = api_base.filter(|b| !b.is_empty()) {
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
