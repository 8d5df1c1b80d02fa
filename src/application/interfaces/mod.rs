pub mod chat_proxy;
pub mod completion_service;

pub use chat_proxy::ChatProxy;
pub use completion_service::CompletionService;
