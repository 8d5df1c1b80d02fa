pub mod application;
pub mod connector;
pub mod domain;

pub use application::{ChatProxy, CompletionService, SendMessageUseCase};

pub use connector::api::{router, serve, AppState};
pub use connector::{ChatSession, GroqClient, HttpChatProxy, MockCompletion, ERROR_REPLY};

pub use domain::{Conversation, DomainError, Message, Role};
