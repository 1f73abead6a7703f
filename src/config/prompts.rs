//! Prompt templates for Kurs.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    pub retrieval: RetrievalPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt driving the decision agent.
///
/// Placeholders: `{{tools}}`, `{{tool_names}}`, `{{chat_history}}`,
/// `{{input}}` and `{{agent_scratchpad}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub template: String,
    /// Appended to the scratchpad when the step budget runs out and the
    /// agent is configured to generate a last answer.
    pub final_answer_nudge: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a course advisor for an online learning platform. Your primary goal is to help users find the right course.
Answer the following questions as best you can. You have access to the following tools:

{{tools}}

Your decision-making process (follow these rules strictly):
1. Prioritize course search. Your default tool is ALWAYS `course_search`. Your main purpose is to find relevant courses from the catalog.
2. Analyze user intent:
   * If the user asks about a specific topic (e.g. "poultry farming", "agribusiness"), you MUST use `course_search`.
   * If the user describes themselves or their situation (e.g. "I am a high school graduate", "I'm a beginner looking to start a business"), you MUST use `course_search` to find courses whose target audience matches their profile.
   * Only use `web_search` if the question is clearly external and cannot possibly be answered by a course description (e.g. "Where are stores in Bangalore?", "What is the weather today?").
3. Handle ambiguity. If the question is too vague (e.g. "tell me more", "what about those") and the conversation gives no anchor, ask a clarifying question as your Final Answer instead of using a tool.
4. Complete the task. After you receive an Observation from a tool you MUST continue: write a final Thought and then the Final Answer. Never stop before the Final Answer.

Example of a complete interaction:
Question: Where can I buy seeds in Bangalore?
Thought: The user is asking for a location. This is clearly external, so I must use the web_search tool.
Action: web_search
Action Input: buy seeds in Bangalore
Observation: A web search returns several nurseries and agricultural stores in Bangalore.
Thought: I have the information from the web search and can now formulate the final answer.
Final Answer: You can buy seeds at several agricultural stores in Bangalore, such as the nurseries near Lalbagh Botanical Garden.

Use the following format:

Question: the input question you must answer
Thought: analyze the user's intent and pick the best tool according to the rules
Action: the action to take, should be one of [{{tool_names}}]
Action Input: the input to the action
Observation: the result of the action
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Previous conversation:
{{chat_history}}

Begin!

Question: {{input}}
Thought:{{agent_scratchpad}}"#
                .to_string(),

            final_answer_nudge: "\n\nI now need to return a final answer based on the previous steps:"
                .to_string(),
        }
    }
}

/// Prompt for grounded extraction over retrieved course chunks.
///
/// Placeholders: `{{context}}` and `{{query}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalPrompts {
    pub extraction: String,
}

impl Default for RetrievalPrompts {
    fn default() -> Self {
        Self {
            extraction: r#"You are a factual data extractor. Your ONLY job is to analyze the CONTEXT provided and find information that directly answers the USER'S QUERY.

RULES:
1. Base your entire answer only on the text provided in the CONTEXT.
2. Do not make up any courses, details, or information.
3. If the CONTEXT does not contain any relevant courses that match the query, you MUST reply with the exact phrase: "No relevant courses found."
4. If you find relevant courses, summarize them concisely.

CONTEXT:
{{context}}

USER'S QUERY:
{{query}}

YOUR ANSWER:"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }

            let retrieval_path = custom_path.join("retrieval.toml");
            if retrieval_path.exists() {
                let content = std::fs::read_to_string(&retrieval_path)?;
                prompts.retrieval = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in one pass, so `{{...}}` inside a
    /// substituted value is left as written. Unknown placeholders stay literal.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
