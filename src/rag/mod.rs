//! Catalog retrieval: nearest-chunk lookup followed by grounded extraction.
//!
//! Provides the `course_search` tool used by the agent.

pub mod context;
mod retriever;

pub use context::ContextBuilder;
pub use retriever::{CourseSearchTool, DATABASE_UNAVAILABLE, NO_RELEVANT_COURSES};
