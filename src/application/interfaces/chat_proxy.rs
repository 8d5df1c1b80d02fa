use async_trait::async_trait;

use crate::domain::DomainError;

/// Client-side transport to the proxy endpoint.
///
/// One call per user submission; no retries, no streaming. The session layer
/// ([`crate::ChatSession`]) turns any error from here into a canned assistant
/// message rather than propagating it.
#[async_trait]
pub trait ChatProxy: Send + Sync {
    /// Submit a single user message and return the assistant's reply text.
    async fn send(&self, message: &str) -> Result<String, DomainError>;
}
