use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Mock HTTP client returning canned JSON responses in order
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: Mutex<Vec<Result<serde_json::Value, String>>>,
        requests: Mutex<Vec<serde_json::Value>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, response: serde_json::Value) -> Self {
            self.responses.lock().unwrap().push(Ok(response));
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.responses.lock().unwrap().push(Err(error.into()));
            self
        }

        /// Request bodies seen by this client, in order
        pub fn requests(&self) -> Vec<serde_json::Value> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            _url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.requests.lock().unwrap().push(body.clone());

            let mut responses = self.responses.lock().unwrap();

            if responses.is_empty() {
                return Err(DomainError::provider("mock", "No mock response configured"));
            }

            match responses.remove(0) {
                Ok(value) => Ok(value),
                Err(message) => Err(DomainError::provider("mock", message)),
            }
        }
    }
}
