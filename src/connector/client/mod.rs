pub mod http_chat_proxy;
pub mod session;

pub use http_chat_proxy::HttpChatProxy;
pub use session::{ChatSession, ERROR_REPLY};
