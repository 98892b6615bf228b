use serde::{Deserialize, Serialize};

use super::Message;

/// Parameters for a chat completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn builder() -> LlmRequestBuilder {
        LlmRequestBuilder::new()
    }
}

/// Builder for LlmRequest
#[derive(Debug, Default)]
pub struct LlmRequestBuilder {
    messages: Vec<Message>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(Message::assistant(content))
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn build(self) -> LlmRequest {
        LlmRequest {
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    #[test]
    fn test_builder_preserves_message_order() {
        let request = LlmRequest::builder()
            .system("instructions")
            .assistant("context")
            .user("question")
            .temperature(0.1)
            .build();

        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(request.temperature, Some(0.1));
    }
}
