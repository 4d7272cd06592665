// OpenAI-compatible chat-completion client
use crate::config::LlmConfig;
use crate::llm::traits::{CompletionClient, CompletionRequest};
use crate::model::ProviderError;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(cfg: &LlmConfig) -> Result<Self, ProviderError> {
        let api_key = cfg.resolved_api_key().ok_or(ProviderError::MissingApiKey)?;
        let endpoint = Url::parse(&cfg.endpoint)
            .map_err(|e| ProviderError::Http(format!("invalid endpoint {}: {}", cfg.endpoint, e)))?;

        let mut builder = Client::builder()
            .user_agent(concat!("extrasabaq/", env!("CARGO_PKG_VERSION")));
        // Self-hosted models on loopback are never reached through a proxy.
        if matches!(endpoint.host_str(), Some("localhost" | "127.0.0.1" | "[::1]")) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, req: &CompletionRequest) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: &req.system },
                ChatMessage { role: "user", content: &req.user },
            ],
            temperature: req.temperature,
        };
        debug!("📤 Sending completion request to {} (model {})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Model provider responded [{}]: {}", status, body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
