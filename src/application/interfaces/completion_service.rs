use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a chat-style prompt to an LLM and receiving the
/// generated text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::SendMessageUseCase`]) remain decoupled
/// from any particular provider or HTTP client library.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send a `system` context message followed by a `user` prompt and return
    /// the assistant's response text. An empty string means the provider
    /// returned no content.
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError>;
}
