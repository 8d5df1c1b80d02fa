use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::CompletionService;
use crate::domain::DomainError;

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the Groq chat-completions API (OpenAI-compatible wire
/// format).
///
/// Implements [`CompletionService`] so the proxy endpoint stays decoupled
/// from transport and serialization details. Sampling parameters are fixed
/// (temperature 0.7, 1024 output tokens); each request carries the system
/// instruction plus exactly one user message.
///
/// Configuration is read from the environment once at construction:
///
/// ```text
/// GROQ_API_KEY=gsk-...                  (required for the hosted service)
/// GROQ_MODEL=mixtral-8x7b-32768         (optional)
/// GROQ_BASE_URL=https://api.groq.com    (optional, any compatible server)
/// ```
///
/// A missing key is not an error here — the hosted API rejects the request
/// and the failure surfaces as the generic upstream error.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + CHAT_COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable        | Default                  | Purpose                 |
    /// |-----------------|--------------------------|-------------------------|
    /// | `GROQ_API_KEY`  | `""` (empty)             | Bearer credential       |
    /// | `GROQ_MODEL`    | `mixtral-8x7b-32768`     | Completion model        |
    /// | `GROQ_BASE_URL` | `https://api.groq.com`   | Any compatible server   |
    pub fn from_env() -> Self {
        let key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base = std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if key.is_empty() {
            warn!("GROQ_API_KEY is not set; completion calls will fail");
        }
        Self::new(key, model, base)
    }

    /// First choice's content, or an empty string when the provider returned
    /// none. The caller decides what an empty reply means.
    fn extract_text(response: ApiResponse) -> String {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionService for GroqClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("GroqClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GroqClient: API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "GroqClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("GroqClient: failed to parse response: {e}"))
        })?;

        Ok(Self::extract_text(api_response))
    }
}
