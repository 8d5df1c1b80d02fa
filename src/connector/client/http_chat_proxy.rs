use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ChatProxy;
use crate::domain::DomainError;

const CHAT_PATH: &str = "/api/chat";

#[derive(serde::Serialize)]
struct ProxyRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ProxyResponse {
    response: String,
}

/// [`ChatProxy`] over HTTP: posts the user message to the proxy endpoint and
/// returns the assistant text.
pub struct HttpChatProxy {
    client: reqwest::Client,
    /// Full endpoint URL (server base + CHAT_PATH).
    url: String,
}

impl HttpChatProxy {
    pub fn new(server_url: impl Into<String>) -> Self {
        let base: String = server_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            url,
        }
    }
}

#[async_trait]
impl ChatProxy for HttpChatProxy {
    async fn send(&self, message: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ProxyRequest { message })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("HttpChatProxy: request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "HttpChatProxy: server returned {}",
                response.status()
            )));
        }

        let body: ProxyResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("HttpChatProxy: failed to parse response: {e}"))
        })?;

        Ok(body.response)
    }
}
