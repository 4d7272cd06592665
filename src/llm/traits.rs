use crate::model::ProviderError;

/// One chat-completion exchange: a system instruction and a user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first completion choice.
    async fn complete(&self, req: &CompletionRequest) -> Result<String, ProviderError>;
}
