use std::sync::Arc;

use tracing::debug;

use crate::application::ChatProxy;
use crate::domain::{Conversation, DomainError, Message};

/// Appended verbatim whenever the proxy call fails for any reason.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// The conversation view: an append-only message list plus an
/// awaiting-response flag.
///
/// The submission flow follows the page it models: the user entry is
/// appended synchronously, the flag is set while exactly one proxy call is
/// in flight, and settlement (success or failure) appends exactly one
/// assistant entry and clears the flag. Transport errors never escape —
/// they become [`ERROR_REPLY`]. A submit while a call is pending is
/// rejected, not queued.
pub struct ChatSession {
    proxy: Arc<dyn ChatProxy>,
    conversation: Conversation,
    pending: bool,
}

impl ChatSession {
    pub fn new(proxy: Arc<dyn ChatProxy>) -> Self {
        Self {
            proxy,
            conversation: Conversation::new(),
            pending: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// First half of a submission: validate, append the user entry, raise
    /// the pending flag. Rejected while a call is already in flight and for
    /// blank input (the input field refuses both).
    pub fn begin(&mut self, text: &str) -> Result<(), DomainError> {
        if self.pending {
            return Err(DomainError::invalid_input(
                "a response is still pending; input is disabled",
            ));
        }
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("cannot send an empty message"));
        }
        self.pending = true;
        self.conversation.push_user(text);
        Ok(())
    }

    /// Second half: append exactly one assistant entry for the settled call
    /// and clear the pending flag. Failures collapse into [`ERROR_REPLY`].
    pub fn settle(&mut self, result: Result<String, DomainError>) -> &Message {
        self.pending = false;
        match result {
            Ok(reply) => self.conversation.push_assistant(reply),
            Err(e) => {
                debug!("Proxy call failed: {e}");
                self.conversation.push_assistant(ERROR_REPLY)
            }
        }
    }

    /// Full submission round trip: `begin`, one proxy call, `settle`.
    /// Returns the appended assistant entry; `Err` only for a rejected
    /// submission (pending or blank input), never for transport failures.
    pub async fn submit(&mut self, text: &str) -> Result<&Message, DomainError> {
        self.begin(text)?;
        let result = self.proxy.send(text).await;
        Ok(self.settle(result))
    }
}
