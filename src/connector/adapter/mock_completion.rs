use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::CompletionService;
use crate::domain::DomainError;

/// A [`CompletionService`] with canned behavior for tests and offline runs.
///
/// Counts invocations so tests can assert the upstream was (or was not)
/// called.
pub struct MockCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl MockCompletion {
    /// Always succeed with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with an upstream error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(DomainError::upstream(msg.clone())),
        }
    }
}
