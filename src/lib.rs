//! Kurs - Course catalog assistant
//!
//! A support assistant for an online course catalog. Questions are answered
//! by a reasoning agent that can look courses up in an embedded catalog
//! index or search the web.
//!
//! # Overview
//!
//! Kurs allows you to:
//! - Index a course table (CSV) into a searchable vector index
//! - Ask questions about courses, their audience and languages
//! - Fall back to web search for questions outside the catalog
//! - Chat interactively with memory of the conversation
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `catalog` - Course records and CSV loading
//! - `chunking` - Recursive text chunking
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity index
//! - `indexer` - Catalog index construction
//! - `llm` - Language model abstraction
//! - `rag` - The `course_search` tool
//! - `web_search` - The `web_search` tool
//! - `agent` - ReAct decision agent
//! - `memory` / `session` - Conversation state
//! - `orchestrator` - Wiring of all components
//!
//! # Example
//!
//! ```rust,no_run
//! use kurs::config::Settings;
//! use kurs::orchestrator::create_agent;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = create_agent(&settings).await?;
//!
//!     let response = agent.handle("Which courses suit a beginner farmer?", &[]).await?;
//!     println!("{}", response.output);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod catalog;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod llm;
pub mod memory;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod vector_store;
pub mod web_search;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{KursError, Result};
