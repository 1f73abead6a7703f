//! Parsing of raw model text into a single reasoning step.
//!
//! The model writes in the ReAct layout:
//!
//! ```text
//! Thought: ...
//! Action: <tool name>
//! Action Input: <tool input>
//! ```
//!
//! or finishes with `Final Answer: <text>`. Anything the model writes after
//! an `Observation:` line is discarded, since observations come from tools.

/// Marker the model must never write itself; generation stops on it.
pub const OBSERVATION_STOP: &str = "\nObservation:";

const FINAL_ANSWER: &str = "Final Answer:";

pub(crate) const BOTH_ACTION_AND_ANSWER: &str =
    "Parsing LLM output produced both a final answer and a parse-able action";
pub(crate) const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub(crate) const MISSING_TOOL_NAME: &str = "Invalid Format: Missing tool name after 'Action:'";
pub(crate) const EMPTY_FINAL_ANSWER: &str = "Invalid Format: 'Final Answer:' must be followed by the answer";

/// One parsed step of the reasoning loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedStep {
    /// Reasoning with no action and no answer.
    Thought(String),
    /// Request to run a tool.
    ToolCall {
        thought: String,
        name: String,
        input: String,
    },
    /// The answer for the user; ends the episode.
    FinalAnswer { thought: String, text: String },
    /// Output that violates the step grammar.
    Malformed { reason: String },
}

impl ParsedStep {
    fn malformed(reason: &str) -> Self {
        ParsedStep::Malformed {
            reason: reason.to_string(),
        }
    }
}

/// Parse raw model output into a [`ParsedStep`].
pub fn parse_step(raw: &str) -> ParsedStep {
    let text = truncate_at_observation(raw);
    let lines: Vec<&str> = text.lines().collect();

    let action_line = lines.iter().position(|l| action_value(l).is_some());
    // The answer is whatever follows the last marker.
    let final_answer = text.find(FINAL_ANSWER).zip(text.rfind(FINAL_ANSWER)).map(
        |(first, last)| (first, text[last + FINAL_ANSWER.len()..].trim()),
    );

    let action = action_line.and_then(|i| {
        let name = action_value(lines[i])?.trim();
        let (offset, first) = lines[i + 1..]
            .iter()
            .enumerate()
            .find_map(|(j, l)| action_input_value(l).map(|v| (j, v)))?;
        let mut input = vec![first];
        input.extend(&lines[i + 2 + offset..]);
        Some((i, name, input.join("\n")))
    });

    match (action, final_answer) {
        (Some(_), Some(_)) => ParsedStep::malformed(BOTH_ACTION_AND_ANSWER),
        (Some((_, "", _)), None) => ParsedStep::malformed(MISSING_TOOL_NAME),
        (Some((i, name, input)), None) => ParsedStep::ToolCall {
            thought: clean_thought(&lines[..i].join("\n")),
            name: name.to_string(),
            input: clean_input(&input),
        },
        (None, Some((_, ""))) => ParsedStep::malformed(EMPTY_FINAL_ANSWER),
        (None, Some((pos, answer))) => ParsedStep::FinalAnswer {
            thought: clean_thought(&text[..pos]),
            text: answer.to_string(),
        },
        (None, None) if action_line.is_some() => ParsedStep::malformed(MISSING_ACTION_INPUT),
        (None, None) => ParsedStep::Thought(clean_thought(text)),
    }
}

/// Cut the text at the first `Observation:` line the model wrote itself.
pub fn truncate_at_observation(raw: &str) -> &str {
    match raw.find(OBSERVATION_STOP) {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

/// Value of an `Action:` line (also `Action 1:`), but not `Action Input:`.
fn action_value(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("Action")?;
    skip_index(rest).strip_prefix(':')
}

/// Value of an `Action Input:` line (also `Action 1 Input 1:`).
fn action_input_value(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("Action")?;
    let rest = skip_index(rest).strip_prefix("Input")?;
    skip_index(rest).strip_prefix(':')
}

fn skip_index(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
}

fn clean_thought(text: &str) -> String {
    let text = text.trim();
    text.strip_prefix("Thought:").unwrap_or(text).trim().to_string()
}

fn clean_input(input: &str) -> String {
    input.trim().trim_matches('"').trim().to_string()
}
