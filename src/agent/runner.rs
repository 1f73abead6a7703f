//! Agent runner with the ReAct reasoning loop.

use super::parser::{parse_step, truncate_at_observation, ParsedStep, OBSERVATION_STOP};
use super::tools::ToolRegistry;
use crate::config::{EarlyStopping, Prompts};
use crate::error::Result;
use crate::llm::{CompletionRequest, LanguageModel};
use crate::memory::{render_history, ConversationTurn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default number of model calls per episode.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Returned when the step budget runs out without a final answer.
pub const BUDGET_EXHAUSTED_MESSAGE: &str = "I'm sorry, I could not complete your request within the allowed number of reasoning steps. Please try rephrasing your question.";

/// Observation fed back when the model reasons without acting.
const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";

/// Agent that decides, step by step, whether to search the catalog, search
/// the web, or answer directly.
pub struct Agent {
    llm: Arc<dyn LanguageModel>,
    tools: ToolRegistry,
    prompts: Prompts,
    max_iterations: usize,
    early_stopping: EarlyStopping,
}

impl Agent {
    /// Create a new agent over the given model and tools.
    pub fn new(llm: Arc<dyn LanguageModel>, tools: ToolRegistry) -> Self {
        Self {
            llm,
            tools,
            prompts: Prompts::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            early_stopping: EarlyStopping::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set maximum model calls per episode.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set what happens when the budget runs out.
    pub fn with_early_stopping(mut self, method: EarlyStopping) -> Self {
        self.early_stopping = method;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run one episode for a user input.
    ///
    /// `history` is the conversation before this input. Tool failures and
    /// malformed model output become observations; only a failed model call
    /// is returned as an error.
    #[instrument(skip(self, history), fields(history_len = history.len()))]
    pub async fn handle(&self, input: &str, history: &[ConversationTurn]) -> Result<AgentResponse> {
        let chat_history = render_history(history);
        let mut scratchpad = String::new();
        let mut steps = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!("Agent iteration {}", iteration);

            let prompt = self.render_prompt(input, &chat_history, &scratchpad);
            let request = CompletionRequest::new(prompt).with_stop(OBSERVATION_STOP);
            let raw = self.llm.complete(&request).await?;
            let log = truncate_at_observation(&raw);

            let step = match parse_step(log) {
                ParsedStep::FinalAnswer { text, .. } => {
                    info!("Agent finished after {} iteration(s)", iteration);
                    return Ok(AgentResponse {
                        output: text,
                        steps,
                        iterations: iteration,
                        outcome: EpisodeOutcome::Finished,
                    });
                }
                ParsedStep::ToolCall { thought, name, input } => {
                    let observation = self.run_tool(&name, &input).await;
                    AgentStep {
                        thought,
                        action: Some(name),
                        action_input: Some(input),
                        observation,
                    }
                }
                ParsedStep::Thought(thought) => AgentStep {
                    thought,
                    action: None,
                    action_input: None,
                    observation: MISSING_ACTION.to_string(),
                },
                ParsedStep::Malformed { reason } => {
                    debug!("Malformed step: {}", reason);
                    AgentStep {
                        thought: String::new(),
                        action: None,
                        action_input: None,
                        observation: reason,
                    }
                }
            };

            scratchpad.push_str(&format!("{}\nObservation: {}\nThought: ", log, step.observation));
            steps.push(step);
        }

        warn!("Agent stopped after reaching {} iterations", self.max_iterations);
        let output = match self.early_stopping {
            EarlyStopping::Force => BUDGET_EXHAUSTED_MESSAGE.to_string(),
            EarlyStopping::Generate => self.generate_final(input, &chat_history, &scratchpad).await,
        };

        Ok(AgentResponse {
            output,
            steps,
            iterations: self.max_iterations,
            outcome: EpisodeOutcome::BudgetExceeded,
        })
    }

    fn render_prompt(&self, input: &str, chat_history: &str, scratchpad: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("tools".to_string(), self.tools.render_catalog());
        vars.insert("tool_names".to_string(), self.tools.render_names());
        vars.insert("chat_history".to_string(), chat_history.to_string());
        vars.insert("input".to_string(), input.to_string());
        vars.insert("agent_scratchpad".to_string(), scratchpad.to_string());

        self.prompts
            .render_with_custom(&self.prompts.agent.template, &vars)
    }

    async fn run_tool(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.tools.get(name) else {
            warn!("Model requested unknown tool: {}", name);
            return format!(
                "{} is not a valid tool, try one of [{}].",
                name,
                self.tools.render_names()
            );
        };

        info!("Agent calling tool: {} with input: {}", name, input);
        match tool.invoke(input).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                format!("Tool error: {}", e)
            }
        }
    }

    /// One extra model call asking for an answer from the steps so far.
    async fn generate_final(&self, input: &str, chat_history: &str, scratchpad: &str) -> String {
        let scratchpad = format!("{}{}", scratchpad, self.prompts.agent.final_answer_nudge);
        let prompt = self.render_prompt(input, chat_history, &scratchpad);

        match self.llm.complete(&CompletionRequest::new(prompt)).await {
            Ok(raw) => match parse_step(&raw) {
                ParsedStep::FinalAnswer { text, .. } => text,
                _ => BUDGET_EXHAUSTED_MESSAGE.to_string(),
            },
            Err(e) => {
                warn!("Final answer generation failed: {}", e);
                BUDGET_EXHAUSTED_MESSAGE.to_string()
            }
        }
    }
}

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// The model produced a final answer.
    Finished,
    /// The step budget ran out first.
    BudgetExceeded,
}

/// One completed reasoning step.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub thought: String,
    /// Tool the model asked for, if any.
    pub action: Option<String>,
    pub action_input: Option<String>,
    /// Tool output, or the corrective message for a bad step.
    pub observation: String,
}

/// Response from an agent episode.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// Text shown to the user. Never empty.
    pub output: String,
    pub steps: Vec<AgentStep>,
    /// Number of model calls counted against the budget.
    pub iterations: usize,
    pub outcome: EpisodeOutcome,
}

impl AgentResponse {
    /// Names of the tools invoked, in order.
    pub fn tools_used(&self) -> Vec<&str> {
        self.steps.iter().filter_map(|s| s.action.as_deref()).collect()
    }
}
