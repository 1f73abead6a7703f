//! Conversation memory.
//!
//! An append-only transcript of the chat. A fresh memory starts with the
//! assistant's greeting so the first thing a user sees is always at index 0.

use serde::{Deserialize, Serialize};

/// Greeting placed at the start of every new conversation.
pub const DEFAULT_GREETING: &str = "Hello! How can I assist you today?";

/// A single utterance in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum ConversationTurn {
    User(String),
    Assistant(String),
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationTurn::User(text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ConversationTurn::Assistant(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            ConversationTurn::User(text) | ConversationTurn::Assistant(text) => text,
        }
    }

    pub fn speaker(&self) -> &'static str {
        match self {
            ConversationTurn::User(_) => "User",
            ConversationTurn::Assistant(_) => "Assistant",
        }
    }
}

/// Ordered, append-only conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    /// Start a conversation with the given assistant greeting.
    pub fn new(greeting: &str) -> Self {
        Self {
            turns: vec![ConversationTurn::assistant(greeting)],
        }
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn add_user(&mut self, text: impl Into<String>) {
        self.append(ConversationTurn::user(text));
    }

    pub fn add_assistant(&mut self, text: impl Into<String>) {
        self.append(ConversationTurn::assistant(text));
    }

    /// Every turn in insertion order.
    pub fn all(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

/// Render turns as `User: ...` / `Assistant: ...` lines for a prompt.
pub fn render_history(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker(), t.text()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_memory_starts_with_greeting() {
        let memory = ConversationMemory::default();
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.all()[0], ConversationTurn::assistant(DEFAULT_GREETING));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut memory = ConversationMemory::new("Hi!");
        memory.add_user("What courses teach farming?");
        memory.add_assistant("Poultry Farming is available in Tamil.");
        memory.append(ConversationTurn::user("Thanks"));

        let texts: Vec<&str> = memory.all().iter().map(|t| t.text()).collect();
        assert_eq!(
            texts,
            vec![
                "Hi!",
                "What courses teach farming?",
                "Poultry Farming is available in Tamil.",
                "Thanks"
            ]
        );
        assert!(matches!(memory.all()[3], ConversationTurn::User(_)));
    }

    #[test]
    fn test_render_history() {
        let mut memory = ConversationMemory::new("Hello!");
        memory.add_user("Any tailoring courses?");

        assert_eq!(
            render_history(memory.all()),
            "Assistant: Hello!\nUser: Any tailoring courses?"
        );
        assert_eq!(render_history(&[]), "");
    }

    #[test]
    fn test_turn_json_shape() {
        let json = serde_json::to_string(&ConversationTurn::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);

        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert_eq!(turn, ConversationTurn::assistant("hello"));
    }
}
