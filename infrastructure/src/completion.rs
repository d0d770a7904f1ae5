use async_trait::async_trait;
use domain::chat::ChatMessage;
use shared::types::Result;

/// A remote chat-completion endpoint: role-tagged messages in, text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
