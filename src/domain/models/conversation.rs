use serde::{Deserialize, Serialize};

use super::{Message, Role};

/// An ordered, append-only list of messages.
///
/// Entries are never mutated or removed; the list lives in memory for the
/// duration of a session and is ordered by send time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a borrow of the stored entry.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        // Just pushed, so the list is non-empty.
        self.messages.last().unwrap()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::user(content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::assistant(content))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True when roles strictly alternate user/assistant starting with user.
    /// Every completed send contributes exactly one pair, so a settled
    /// conversation always satisfies this.
    pub fn is_alternating(&self) -> bool {
        self.messages.iter().enumerate().all(|(i, m)| {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            m.role() == expected
        })
    }
}
