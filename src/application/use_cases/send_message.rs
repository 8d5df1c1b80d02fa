use std::sync::Arc;

use tracing::{debug, info};

use crate::application::CompletionService;
use crate::domain::DomainError;

/// System instruction sent with every completion call. Each call is
/// stateless: only the single most recent user message is forwarded, never
/// prior conversation history.
const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Keep your responses concise and helpful.";

/// Substituted when the provider returns a response with no content.
const FALLBACK_RESPONSE: &str = "I am not sure how to respond to that.";

/// Server-side handling of one chat submission: validate, call the
/// completion service once, return the generated text.
pub struct SendMessageUseCase {
    completion_service: Arc<dyn CompletionService>,
}

impl SendMessageUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self { completion_service }
    }

    /// Execute one completion round trip.
    ///
    /// Empty or whitespace-only input is rejected before the completion
    /// service is ever invoked. Upstream failures propagate as
    /// [`DomainError::Upstream`] for the API layer to map.
    pub async fn execute(&self, message: &str) -> Result<String, DomainError> {
        if message.trim().is_empty() {
            debug!("Rejected empty chat message");
            return Err(DomainError::invalid_input("Message is required"));
        }

        info!("Forwarding chat message ({} chars)", message.len());

        let reply = self
            .completion_service
            .complete(SYSTEM_PROMPT, message)
            .await?;

        if reply.trim().is_empty() {
            debug!("Provider returned no content, substituting fallback");
            return Ok(FALLBACK_RESPONSE.to_string());
        }

        Ok(reply)
    }
}
