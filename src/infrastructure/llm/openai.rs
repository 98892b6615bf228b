use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage};
use crate::domain::DomainError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> = request
            .messages
            .iter()
            .map(OpenAiMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response
                .with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Error,
    }
}

// OpenAI API wire types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        use crate::domain::llm::MessageRole;

        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    id: String,
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::http_client::mock::MockHttpClient;

    fn completion_json(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        })
    }

    #[tokio::test]
    async fn test_chat_parses_response() {
        let client = MockHttpClient::new().with_response(completion_json("From the manual: 30 days."));
        let provider = OpenAiProvider::new(client, "sk-test");

        let request = LlmRequest::builder().user("What is the return policy?").build();
        let response = provider.chat("gpt-3.5-turbo", request).await.unwrap();

        assert_eq!(response.content(), "From the manual: 30 days.");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 16);
    }

    #[tokio::test]
    async fn test_chat_sends_model_and_messages() {
        let client = MockHttpClient::new().with_response(completion_json("ok"));
        let provider = OpenAiProvider::new(client, "sk-test");

        let request = LlmRequest::builder()
            .system("instructions")
            .user("question")
            .temperature(0.1)
            .build();
        provider.chat("gpt-3.5-turbo", request).await.unwrap();

        let sent = provider.client.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["model"], "gpt-3.5-turbo");
        assert_eq!(sent[0]["messages"][0]["role"], "system");
        assert_eq!(sent[0]["messages"][1]["role"], "user");
        assert!((sent[0]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_chat_propagates_http_error() {
        let client = MockHttpClient::new().with_error("HTTP 500: upstream down");
        let provider = OpenAiProvider::new(client, "sk-test");

        let request = LlmRequest::builder().user("q").build();
        let result = provider.chat("gpt-3.5-turbo", request).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_empty_choices_is_provider_error() {
        let client = MockHttpClient::new().with_response(serde_json::json!({
            "id": "chatcmpl-2",
            "model": "gpt-3.5-turbo",
            "choices": []
        }));
        let provider = OpenAiProvider::new(client, "sk-test");

        let request = LlmRequest::builder().user("q").build();
        assert!(provider.chat("gpt-3.5-turbo", request).await.is_err());
    }
}
