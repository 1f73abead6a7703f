//! OpenAI chat completion backend.

use super::{CompletionRequest, LanguageModel};
use crate::config::LlmSettings;
use crate::error::{KursError, Result};
use crate::openai::create_client_with;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, Stop,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// The API accepts at most four stop sequences.
const MAX_STOP_SEQUENCES: usize = 4;

/// Chat model that sends the prompt as a single user message.
pub struct OpenAIChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_with(
                Duration::from_secs(settings.timeout_secs),
                settings.api_base.as_deref(),
            )?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAIChatModel {
    #[instrument(skip(self, request), fields(model = %self.model, prompt_len = request.prompt.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.clone())
                .build()
                .map_err(|e| KursError::Llm(e.to_string()))?
                .into(),
        ];

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature);

        if !request.stop.is_empty() {
            let stop: Vec<String> = request.stop.iter().take(MAX_STOP_SEQUENCES).cloned().collect();
            builder.stop(Stop::StringArray(stop));
        }

        let chat_request = builder.build().map_err(|e| KursError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| KursError::OpenAI(format!("Failed to generate response: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| KursError::Llm("Empty response from LLM".to_string()))?
            .clone();

        debug!("LLM response: {}", content.chars().take(300).collect::<String>());
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_settings() {
        let settings = LlmSettings {
            model: "llama3.1:8b".to_string(),
            api_base: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        };
        let model = OpenAIChatModel::from_settings(&settings).unwrap();
        assert_eq!(model.model_name(), "llama3.1:8b");
    }
}
