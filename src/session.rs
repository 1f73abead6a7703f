//! Interactive chat session.
//!
//! Pairs a shared [`Agent`] with the conversation memory of one user.

use crate::agent::{Agent, AgentResponse};
use crate::error::KursError;
use crate::memory::ConversationMemory;
use std::sync::Arc;
use tracing::error;

/// Shown to the user when an episode fails outright.
pub fn apology(error: &KursError) -> String {
    format!(
        "I apologize, but I encountered an issue: {}. Please try rephrasing your question or try again.",
        error
    )
}

/// One conversation: an agent plus its memory.
pub struct ChatSession {
    agent: Arc<Agent>,
    memory: ConversationMemory,
}

impl ChatSession {
    pub fn new(agent: Arc<Agent>, greeting: &str) -> Self {
        Self {
            agent,
            memory: ConversationMemory::new(greeting),
        }
    }

    /// The assistant greeting that opened this session.
    pub fn greeting(&self) -> &str {
        self.memory.all().first().map(|t| t.text()).unwrap_or_default()
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Send a user message and return the reply to display.
    ///
    /// The user turn is always recorded. The assistant turn is recorded only
    /// when the episode succeeds; failures return an apology instead.
    pub async fn send(&mut self, input: &str) -> String {
        match self.exchange(input).await {
            Ok(response) => response.output,
            Err(e) => apology(&e),
        }
    }

    /// Like [`send`](Self::send) but exposes the full agent response.
    pub async fn exchange(&mut self, input: &str) -> crate::error::Result<AgentResponse> {
        let result = self.agent.handle(input, self.memory.all()).await;
        self.memory.add_user(input);

        match result {
            Ok(response) => {
                self.memory.add_assistant(response.output.clone());
                Ok(response)
            }
            Err(e) => {
                error!("Agent episode failed: {}", e);
                Err(e)
            }
        }
    }
}
