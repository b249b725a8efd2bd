use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::error::{OllamaError, ServiceError, ServiceResult};

/// Ollama-compatible chat API client
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    /// Create a new client from the chat configuration
    pub fn new(config: &ChatConfig) -> ServiceResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ServiceError::Ollama(OllamaError::Connection {
                    url: base_url.clone(),
                    source: e,
                })
            })?;

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check if the model endpoint is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Model endpoint health check failed");
                false
            }
        }
    }

    /// Non-streaming chat completion.
    ///
    /// With `json_mode` the endpoint is asked to constrain output to a
    /// single JSON value.
    pub async fn chat(&self, messages: Vec<ChatMessage>, json_mode: bool) -> ServiceResult<String> {
        let url = format!("{}/api/chat", self.base_url);

        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            format: json_mode.then(|| "json".to_string()),
            options: Some(OllamaOptions {
                temperature: Some(self.temperature),
            }),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OllamaError::Connection {
                url: url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            if message.contains("model") && message.contains("not found") {
                return Err(ServiceError::Ollama(OllamaError::ModelNotFound {
                    model: self.model.clone(),
                }));
            }

            return Err(ServiceError::Ollama(OllamaError::Generation {
                status,
                message,
            }));
        }

        let body = response.text().await.map_err(|e| OllamaError::Connection {
            url: url.clone(),
            source: e,
        })?;
        let chat_response: OllamaChatResponse = serde_json::from_str(&body)
            .map_err(|e| OllamaError::InvalidResponse { source: e })?;

        debug!(
            model = %self.model,
            chars = chat_response.message.content.len(),
            "Model reply received"
        );
        Ok(chat_response.message.content)
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Internal Ollama API types

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OllamaClient {
        let mut config = AppConfig::default().chat;
        config.base_url = server.uri();
        OllamaClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "llama3.2",
                "stream": false,
                "format": "json"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.2",
                "message": {"role": "assistant", "content": "{\"final\": \"hi\"}"},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let reply = client
            .chat(vec![ChatMessage::user("hello")], true)
            .await
            .unwrap();
        assert_eq!(reply, "{\"final\": \"hi\"}");
    }

    #[tokio::test]
    async fn test_model_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "model 'llama3.2' not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .chat(vec![ChatMessage::user("hello")], false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ollama(OllamaError::ModelNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_generation_failure_and_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.chat(vec![], false).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ollama(OllamaError::Generation { status: 500, .. })
        ));
        let err = client.chat(vec![], false).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ollama(OllamaError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .mount(&server)
            .await;
        assert!(client_for(&server).health_check().await);
    }
}
