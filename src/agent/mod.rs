//! Decision agent.
//!
//! A ReAct-style loop: the model thinks, picks a tool, reads the tool's
//! observation and repeats until it writes a final answer or the step
//! budget runs out. The agent only knows tools through the [`Tool`] trait.

mod parser;
mod runner;
mod tools;

pub use parser::{parse_step, ParsedStep, OBSERVATION_STOP};
pub use runner::{
    Agent, AgentResponse, AgentStep, EpisodeOutcome, BUDGET_EXHAUSTED_MESSAGE,
    DEFAULT_MAX_ITERATIONS,
};
pub use tools::{Tool, ToolRegistry};
