//! Deterministic fakes shared by unit tests.

use crate::agent::Tool;
use crate::error::{KursError, Result};
use crate::llm::{CompletionRequest, LanguageModel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub(crate) const CATALOG_HEADER: &str =
    "Course Title,About Course,Who This Course Is For,Course Released Languages\n";

/// Write a catalog CSV with the standard header and the given rows.
pub(crate) fn write_catalog(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("courses.csv");
    let mut content = CATALOG_HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

type Handler = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Language model driven by a closure over the prompt.
pub(crate) struct ScriptedModel {
    handler: Handler,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new(handler: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies in order; errors once the script runs out.
    pub(crate) fn replies(replies: Vec<&str>) -> Self {
        let queue: Mutex<VecDeque<String>> =
            Mutex::new(replies.into_iter().map(String::from).collect());
        Self::new(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| KursError::Llm("script exhausted".to_string()))
        })
    }

    /// Fails every call with the given message.
    pub(crate) fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(KursError::OpenAI(message.clone())))
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        (self.handler)(&request.prompt)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

const STOPWORDS: &[&str] = &[
    "about", "course", "courses", "learn", "teach", "tell", "that", "there", "what", "which",
    "with",
];

/// Stand-in for a model obeying the extraction prompt: lists the context
/// blocks sharing a keyword with the query, or the no-match sentence.
pub(crate) fn extract_from_prompt(prompt: &str) -> String {
    let context = prompt
        .split_once("CONTEXT:\n")
        .and_then(|(_, rest)| rest.split_once("\n\nUSER'S QUERY:\n"))
        .map(|(context, _)| context)
        .unwrap_or_default();
    let query = prompt
        .split_once("USER'S QUERY:\n")
        .and_then(|(_, rest)| rest.split_once("\n\nYOUR ANSWER:"))
        .map(|(query, _)| query.to_lowercase())
        .unwrap_or_default();

    let keywords: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 4 && !STOPWORDS.contains(w))
        .map(String::from)
        .collect();

    let matches: Vec<&str> = context
        .split("\n\n")
        .filter(|block| {
            let block = block.to_lowercase();
            keywords.iter().any(|k| block.contains(k.as_str()))
        })
        .collect();

    if matches.is_empty() {
        crate::rag::NO_RELEVANT_COURSES.to_string()
    } else {
        matches.join("\n")
    }
}

/// Tool that records its inputs and returns a canned result.
pub(crate) struct RecordingTool {
    name: String,
    description: String,
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingTool {
    pub(crate) fn ok(name: &str, description: &str, output: &str) -> Self {
        Self::with_reply(name, description, Ok(output.to_string()))
    }

    pub(crate) fn failing(name: &str, description: &str, message: &str) -> Self {
        Self::with_reply(name, description, Err(message.to_string()))
    }

    fn with_reply(name: &str, description: &str, reply: std::result::Result<String, String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        self.calls.lock().unwrap().push(query.to_string());
        self.reply.clone().map_err(KursError::Embedding)
    }
}
