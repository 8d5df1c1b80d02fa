pub mod groq_client;
pub mod mock_completion;

pub use groq_client::GroqClient;
pub use mock_completion::MockCompletion;
